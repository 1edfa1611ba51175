//! Technology fingerprinting and response-header summaries

use crate::record::{HeadersInfo, SecurityHeaders, TechCategory, TechFingerprint};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use scraper::{Html, Selector};
use std::collections::HashMap;

/// One technology recognizer: independent evidence sources, any of
/// which suffices
struct TechRule {
    name: &'static str,
    category: TechCategory,
    html: Vec<Regex>,
    meta: Vec<(&'static str, Regex)>,
    scripts: Vec<Regex>,
    styles: Vec<Regex>,
    headers: Vec<(&'static str, Regex)>,
}

impl TechRule {
    fn new(name: &'static str, category: TechCategory) -> Self {
        Self {
            name,
            category,
            html: Vec::new(),
            meta: Vec::new(),
            scripts: Vec::new(),
            styles: Vec::new(),
            headers: Vec::new(),
        }
    }

    fn html(mut self, pattern: &str) -> Self {
        self.html.push(compile(pattern));
        self
    }

    fn meta(mut self, name: &'static str, pattern: &str) -> Self {
        self.meta.push((name, compile(pattern)));
        self
    }

    fn scripts(mut self, pattern: &str) -> Self {
        self.scripts.push(compile(pattern));
        self
    }

    fn styles(mut self, pattern: &str) -> Self {
        self.styles.push(compile(pattern));
        self
    }

    fn header(mut self, name: &'static str, pattern: &str) -> Self {
        self.headers.push((name, compile(pattern)));
        self
    }
}

fn compile(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .unwrap()
}

// Header names are lowercase to match the fetch layer's header maps.
static TECH_RULES: Lazy<Vec<TechRule>> = Lazy::new(|| {
    use TechCategory::*;
    vec![
        TechRule::new("wordpress", Cms)
            .html(r"wp-content|wp-includes|wordpress")
            .meta("generator", r"WordPress"),
        TechRule::new("drupal", Cms)
            .html(r"drupal|sites/all|sites/default")
            .meta("generator", r"Drupal"),
        TechRule::new("joomla", Cms)
            .html(r"joomla|com_content")
            .meta("generator", r"Joomla"),
        TechRule::new("react", FrameworksJs)
            .html(r"react-root|react-modal")
            .scripts(r"react\.js|react\.min\.js|react\.production\.min\.js"),
        TechRule::new("vue", FrameworksJs)
            .html(r"v-bind|v-if|v-for|v-model")
            .scripts(r"vue\.js|vue\.min\.js|vue\.runtime\.js"),
        TechRule::new("angular", FrameworksJs)
            .html(r"ng-app|ng-controller|ng-model")
            .scripts(r"angular\.js|angular\.min\.js"),
        TechRule::new("bootstrap", FrameworksCss)
            .html(r#"class="[^"]*\b(?:btn|container|row|col-[a-z]{2}-\d+)\b"#)
            .styles(r"bootstrap\.css|bootstrap\.min\.css"),
        TechRule::new("tailwind", FrameworksCss)
            .html(r#"class="[^"]*\b(?:text-[a-z]+-\d+|bg-[a-z]+-\d+)\b"#)
            .styles(r"tailwind\.css|tailwind\.min\.css"),
        TechRule::new("nginx", Servers).header("server", r"nginx"),
        TechRule::new("apache", Servers).header("server", r"Apache"),
        TechRule::new("google-analytics", Analytics)
            .html(r"google-analytics\.com|ga\.js|analytics\.js")
            .scripts(r"google-analytics\.com|ga\.js|analytics\.js"),
        TechRule::new("matomo", Analytics)
            .html(r"matomo\.js|piwik\.js")
            .scripts(r"matomo\.js|piwik\.js"),
        TechRule::new("google-tag-manager", Marketing)
            .html(r"googletagmanager\.com|gtm\.js")
            .scripts(r"googletagmanager\.com|gtm\.js"),
        TechRule::new("facebook-pixel", Marketing)
            .html(r"connect\.facebook\.net|fbevents\.js")
            .scripts(r"connect\.facebook\.net|fbevents\.js"),
        TechRule::new("woocommerce", Ecommerce)
            .html(r"woocommerce|wc-api")
            .meta("generator", r"WooCommerce"),
        TechRule::new("shopify", Ecommerce)
            .html(r"shopify|myshopify\.com")
            .meta("generator", r"Shopify"),
        TechRule::new("prestashop", Ecommerce)
            .html(r"prestashop|presta-shop")
            .meta("generator", r"PrestaShop"),
        TechRule::new("cloudflare", Performance).header("server", r"cloudflare"),
        TechRule::new("varnish", Performance).header("x-varnish", r".+"),
        TechRule::new("jquery", LibrariesJs).scripts(r"jquery\.js|jquery\.min\.js"),
        TechRule::new("lodash", LibrariesJs).scripts(r"lodash\.js|lodash\.min\.js"),
        TechRule::new("moment", LibrariesJs).scripts(r"moment\.js|moment\.min\.js"),
        TechRule::new("font-awesome", Fonts).styles(r"font-awesome\.css|fontawesome"),
        TechRule::new("google-fonts", Fonts).styles(r"fonts\.googleapis\.com"),
        TechRule::new("recaptcha", Security)
            .html(r"www\.google\.com/recaptcha|recaptcha\.js")
            .scripts(r"www\.google\.com/recaptcha|recaptcha\.js"),
        TechRule::new("hcaptcha", Security)
            .html(r"hcaptcha\.com|hcaptcha\.js")
            .scripts(r"hcaptcha\.com|hcaptcha\.js"),
        TechRule::new("webpack", BuildTools).scripts(r"webpack"),
        TechRule::new("babel", BuildTools).scripts(r"babel"),
        TechRule::new("amp", Mobile)
            .html(r"⚡|amp-")
            .meta("mobile-web-app-capable", r"yes"),
    ]
});

/// Detects technologies on a page from markup, meta tags, script and
/// stylesheet references and response headers
///
/// Evidence sources are consulted in that order and short-circuit: one
/// match marks the technology detected.
pub fn detect_technologies(
    document: &Html,
    raw_html: &str,
    headers: &HashMap<String, String>,
) -> TechFingerprint {
    let meta_data = collect_meta(document);
    let (script_srcs, script_content) = collect_scripts(document);
    let (style_hrefs, style_content) = collect_styles(document);

    let mut fingerprint = TechFingerprint::default();

    for rule in TECH_RULES.iter() {
        let mut detected = rule.html.iter().any(|p| p.is_match(raw_html));

        if !detected {
            detected = rule.meta.iter().any(|(name, pattern)| {
                meta_data.get(*name).is_some_and(|content| pattern.is_match(content))
            });
        }

        if !detected {
            detected = rule.scripts.iter().any(|pattern| {
                script_srcs.iter().any(|src| pattern.is_match(src))
                    || pattern.is_match(&script_content)
            });
        }

        if !detected {
            detected = rule.styles.iter().any(|pattern| {
                style_hrefs.iter().any(|href| pattern.is_match(href))
                    || pattern.is_match(&style_content)
            });
        }

        if !detected {
            detected = rule.headers.iter().any(|(name, pattern)| {
                headers.get(*name).is_some_and(|value| pattern.is_match(value))
            });
        }

        if detected {
            fingerprint.push(rule.category, rule.name);
        }
    }

    fingerprint
}

/// Meta tag name/property (lowercased) to content
fn collect_meta(document: &Html) -> HashMap<String, String> {
    let mut meta_data = HashMap::new();
    if let Ok(selector) = Selector::parse("meta") {
        for element in document.select(&selector) {
            let name = element
                .value()
                .attr("name")
                .or_else(|| element.value().attr("property"))
                .unwrap_or("");
            let content = element.value().attr("content").unwrap_or("");
            if !name.is_empty() && !content.is_empty() {
                meta_data.insert(name.to_lowercase(), content.to_string());
            }
        }
    }
    meta_data
}

fn collect_scripts(document: &Html) -> (Vec<String>, String) {
    let mut srcs = Vec::new();
    let mut inline = Vec::new();
    if let Ok(selector) = Selector::parse("script") {
        for element in document.select(&selector) {
            match element.value().attr("src") {
                Some(src) => srcs.push(src.to_string()),
                None => inline.extend(element.text().map(str::to_string)),
            }
        }
    }
    (srcs, inline.join(" "))
}

fn collect_styles(document: &Html) -> (Vec<String>, String) {
    let mut hrefs = Vec::new();
    if let Ok(selector) = Selector::parse(r#"link[rel="stylesheet"]"#) {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                hrefs.push(href.to_string());
            }
        }
    }

    let mut inline = Vec::new();
    if let Ok(selector) = Selector::parse("style") {
        for element in document.select(&selector) {
            inline.extend(element.text().map(str::to_string));
        }
    }
    (hrefs, inline.join(" "))
}

/// Summarizes the interesting response headers
pub fn headers_info(headers: &HashMap<String, String>) -> HeadersInfo {
    HeadersInfo {
        server: header(headers, "server"),
        x_powered_by: header(headers, "x-powered-by"),
        content_type: header(headers, "content-type"),
        content_encoding: header(headers, "content-encoding"),
    }
}

/// Collects the standard security response headers
pub fn security_headers(headers: &HashMap<String, String>) -> SecurityHeaders {
    SecurityHeaders {
        x_frame_options: header(headers, "x-frame-options"),
        x_xss_protection: header(headers, "x-xss-protection"),
        x_content_type_options: header(headers, "x-content-type-options"),
        content_security_policy: header(headers, "content-security-policy"),
        strict_transport_security: header(headers, "strict-transport-security"),
        referrer_policy: header(headers, "referrer-policy"),
    }
}

fn header(headers: &HashMap<String, String>, name: &str) -> String {
    headers.get(name).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(html: &str, headers: &[(&str, &str)]) -> TechFingerprint {
        let document = Html::parse_document(html);
        let headers: HashMap<String, String> = headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        detect_technologies(&document, html, &headers)
    }

    #[test]
    fn test_wordpress_from_markup() {
        let tech = detect(r#"<link href="/wp-content/themes/x/style.css">"#, &[]);
        assert_eq!(tech.cms, vec!["wordpress"]);
    }

    #[test]
    fn test_wordpress_from_generator_meta() {
        let tech = detect(
            r#"<meta name="generator" content="WordPress 6.4">"#,
            &[],
        );
        assert_eq!(tech.cms, vec!["wordpress"]);
    }

    #[test]
    fn test_jquery_from_script_src() {
        let tech = detect(
            r#"<script src="/assets/jquery.min.js"></script>"#,
            &[],
        );
        assert_eq!(tech.libraries_js, vec!["jquery"]);
    }

    #[test]
    fn test_server_headers() {
        let tech = detect("<html></html>", &[("server", "nginx/1.24.0")]);
        assert_eq!(tech.servers, vec!["nginx"]);
    }

    #[test]
    fn test_google_fonts_from_stylesheet() {
        let tech = detect(
            r#"<link rel="stylesheet" href="https://fonts.googleapis.com/css?family=Roboto">"#,
            &[],
        );
        assert_eq!(tech.fonts, vec!["google-fonts"]);
    }

    #[test]
    fn test_empty_page_yields_empty_fingerprint() {
        let tech = detect("<html><body>Hello</body></html>", &[]);
        assert!(tech.is_empty());
    }

    #[test]
    fn test_headers_info_summary() {
        let headers: HashMap<String, String> = [
            ("server", "Apache/2.4"),
            ("x-powered-by", "PHP/8.2"),
            ("content-type", "text/html; charset=utf-8"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let info = headers_info(&headers);
        assert_eq!(info.server, "Apache/2.4");
        assert_eq!(info.x_powered_by, "PHP/8.2");
        assert_eq!(info.content_encoding, "");
    }

    #[test]
    fn test_security_headers_missing_default_empty() {
        let headers: HashMap<String, String> =
            [("strict-transport-security", "max-age=31536000")]
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();

        let security = security_headers(&headers);
        assert_eq!(security.strict_transport_security, "max-age=31536000");
        assert_eq!(security.x_frame_options, "");
    }
}
