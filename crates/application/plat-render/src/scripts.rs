//! Small inline scripts for behavior that only exists in the browser.

/// Sets `src` from `data-src` and swaps in `data-fallback` on load error.
pub fn image_fallback_script() -> &'static str {
    r#"<script>
document.querySelectorAll('img[data-src]').forEach(function (img) {
  var fallback = img.getAttribute('data-fallback');
  if (fallback) {
    img.addEventListener('error', function () { img.src = fallback; }, { once: true });
  }
  img.src = img.getAttribute('data-src');
});
</script>"#
}

/// Adds `is-sticky` to the element once the page scrolls past its initial
/// offset, and removes it when scrolling back.
pub fn sticky_script(element_id: &str) -> String {
    let id = js_string(element_id);
    format!(
        r#"<script>
(function () {{
  var el = document.getElementById({id});
  if (!el) return;
  var offset = el.getBoundingClientRect().top + window.scrollY;
  function update() {{ el.classList.toggle('is-sticky', window.scrollY > offset); }}
  window.addEventListener('scroll', update, {{ passive: true }});
  update();
}})();
</script>"#
    )
}

/// JavaScript string literal for `s`, safe inside a `<script>` element
pub fn js_string(s: &str) -> String {
    serde_json::to_string(s)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sticky_script_targets_element() {
        let js = sticky_script("city-subnav-bar");
        assert!(js.contains(r#"document.getElementById("city-subnav-bar")"#));
        assert!(js.contains("is-sticky"));
        assert!(js.contains("window.scrollY > offset"));
    }

    #[test]
    fn test_sticky_script_escapes_id() {
        let js = sticky_script("</script>");
        assert!(!js.contains("</script>\")"));
        assert!(js.contains("<\\/script>"));
    }

    #[test]
    fn test_fallback_script() {
        assert!(image_fallback_script().contains("data-fallback"));
    }
}
