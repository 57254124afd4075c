//! Inline `<head>` script that applies stored preferences before first paint.
//!
//! SYSTEM CONTEXT
//! ==============
//! WASM hydrates after the first paint, so without this script a dark-theme
//! user would see a light flash. The script writes the same attributes and
//! classes `PreferenceStore` reflects, and the store reads them back as its
//! highest-priority initial source.
//!
//! Background and quality are reflected as attributes even when storage is
//! empty, so the store treats them as document values and persists them once.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use crate::config::StoreConfig;
use crate::prefs::{Background, Quality, Theme};

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// Self-contained JS for an inline `<script>` in the document head.
#[must_use]
pub fn prehydration_script(config: &StoreConfig) -> String {
    format!(
        "(function(){{try{{\
var d=document.documentElement,s=window.localStorage;\
var t=s.getItem({theme_key});if(t!=={light}&&t!=={dark})t={system};\
d.setAttribute({theme_attr},t);\
var k=t==={dark}||(t==={system}&&window.matchMedia({query}).matches);\
if(k)d.classList.add({dark_class});else d.classList.remove({dark_class});\
var b=s.getItem({bg_key});if(b!=={static_bg})b={animated};\
d.setAttribute({bg_attr},b);\
d.classList.add(b==={static_bg}?{static_class}:{animated_class});\
d.classList.remove(b==={static_bg}?{animated_class}:{static_class});\
var q=s.getItem({quality_key});if(q!=={low}&&q!=={medium}&&q!=={high})q={auto};\
d.setAttribute({quality_attr},q);\
}}catch(e){{}}}})();",
        theme_key = js_string(&config.theme_key),
        theme_attr = js_string(&config.theme_attribute),
        dark_class = js_string(&config.dark_class),
        bg_key = js_string(&config.background_key),
        bg_attr = js_string(&config.background_attribute),
        static_class = js_string(&config.static_class),
        animated_class = js_string(&config.animated_class),
        quality_key = js_string(&config.quality_key),
        quality_attr = js_string(&config.quality_attribute),
        light = js_string(Theme::Light.as_str()),
        dark = js_string(Theme::Dark.as_str()),
        system = js_string(Theme::System.as_str()),
        static_bg = js_string(Background::Static.as_str()),
        animated = js_string(Background::Animated.as_str()),
        low = js_string(Quality::Low.as_str()),
        medium = js_string(Quality::Medium.as_str()),
        high = js_string(Quality::High.as_str()),
        auto = js_string(Quality::Auto.as_str()),
        query = js_string(DARK_SCHEME_QUERY),
    )
}

/// JSON string literal that is also safe inside an HTML `<script>` element.
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_owned()).to_string().replace("</", "<\\/")
}
