use super::*;

#[test]
fn script_is_a_guarded_iife() {
    let script = prehydration_script(&StoreConfig::default());
    assert!(script.starts_with("(function(){try{"));
    assert!(script.ends_with("}catch(e){}})();"));
}

#[test]
fn script_uses_default_contract_names() {
    let script = prehydration_script(&StoreConfig::default());
    assert!(script.contains(r#"s.getItem("theme")"#));
    assert!(script.contains(r#"s.getItem("bg")"#));
    assert!(script.contains(r#"s.getItem("quality")"#));
    assert!(script.contains(r#"d.classList.add("dark")"#));
    assert!(script.contains(r#""bg-static""#));
    assert!(script.contains(r#""bg-animated""#));
    assert!(script.contains(r#"window.matchMedia("(prefers-color-scheme: dark)")"#));
}

#[test]
fn script_follows_custom_config() {
    let config = StoreConfig { background_key: "bgMode".into(), dark_class: "dark-mode".into(), ..StoreConfig::default() };
    let script = prehydration_script(&config);
    assert!(script.contains(r#"s.getItem("bgMode")"#));
    assert!(script.contains(r#"d.classList.remove("dark-mode")"#));
}

#[test]
fn script_escapes_embedded_names() {
    let config = StoreConfig { theme_key: "a\"b</script>".into(), ..StoreConfig::default() };
    let script = prehydration_script(&config);
    assert!(script.contains(r#"s.getItem("a\"b<\/script>")"#));
    assert!(!script.contains("</script>"));
}

#[test]
fn script_falls_back_to_sentinels() {
    let script = prehydration_script(&StoreConfig::default());
    assert!(script.contains(r#"t="system""#));
    assert!(script.contains(r#"q="auto""#));
    assert!(script.contains(r#"b="animated""#));
}
