//! Per-builder community sections on the city page.

use crate::cards::{empty_card, NO_COMMUNITIES};
use crate::escape::html_escape;
use plat_core::Community;
use plat_join::BuilderGroup;

/// Stable detail URL of a community
pub fn community_href(community: &Community) -> String {
    format!("/communities/template.html#id={}", community.id)
}

pub fn community_row(community: &Community, builder_name: &str) -> String {
    let status = community
        .status()
        .map(|s| format!(r#" <span class="pill">{}</span>"#, html_escape(s)))
        .unwrap_or_default();

    format!(
        r#"<a class="row-card" href="{href}">
        <div class="row-card__body">
            <div class="row-card__title">{name}</div>
            <div class="row-card__meta">{builder}{status}</div>
        </div>
        <div class="row-card__cta">View →</div>
    </a>"#,
        href = html_escape(&community_href(community)),
        name = html_escape(&community.name),
        builder = html_escape(builder_name),
    )
}

/// Heading plus one row per community of the group
pub fn builder_section(group: &BuilderGroup<'_>) -> String {
    let name = group.name();
    let rows: String = group
        .communities
        .iter()
        .map(|c| community_row(c, name))
        .collect();

    format!(
        r#"<section class="section builder-section">
        <div class="container">
            <h2 class="section__title">{title}</h2>
            <div class="stack">{rows}</div>
        </div>
    </section>"#,
        title = html_escape(name),
    )
}

/// All builder sections in group order, or the empty-state card
pub fn community_sections(groups: &[BuilderGroup<'_>]) -> String {
    if groups.is_empty() {
        return format!(r#"<div class="container">{}</div>"#, empty_card(NO_COMMUNITIES));
    }
    groups.iter().map(builder_section).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use plat_core::Builder;
    use plat_join::group_by_builder;

    #[test]
    fn test_row_without_status_has_no_pill() {
        let html = community_row(&Community::new(10, "Oakview"), "Builder");
        assert!(html.contains(r#"<div class="row-card__title">Oakview</div>"#));
        assert!(html.contains(r#"<div class="row-card__meta">Builder</div>"#));
        assert!(!html.contains("pill"));
        assert!(html.contains(r#"href="/communities/template.html#id=10""#));
    }

    #[test]
    fn test_row_with_status() {
        let c = Community::new("oak-1", "Oakview").with_status("Now Selling");
        let html = community_row(&c, "Lennar");
        assert!(html.contains(r#"Lennar <span class="pill">Now Selling</span>"#));
        assert!(html.contains("#id=oak-1"));
    }

    #[test]
    fn test_sections_follow_group_order() {
        let builders = vec![Builder::new(1, "Zeta Homes"), Builder::new(2, "Alpha Homes")];
        let communities = vec![
            Community::new(10, "Second").by_builder(2),
            Community::new(11, "First").by_builder(1),
        ];
        let refs: Vec<&Community> = communities.iter().collect();
        let groups = group_by_builder(&refs, &builders);
        let html = community_sections(&groups);

        assert_eq!(html.matches("<section").count(), 2);
        let zeta = html.find("Zeta Homes").unwrap();
        let alpha = html.find("Alpha Homes").unwrap();
        assert!(zeta < alpha);
    }

    #[test]
    fn test_empty_groups_show_message() {
        let html = community_sections(&[]);
        assert!(html.contains("No communities listed yet."));
        assert!(!html.contains("<section"));
    }
}
