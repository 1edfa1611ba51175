//! Data model for per-site scraping results
//!
//! These are fixed-shape structs rather than open-ended maps: the set of
//! social platforms, technology categories and company-identifier fields
//! is closed, so the compiler can check exhaustiveness wherever they are
//! merged or flattened.

use serde::{Deserialize, Serialize};

/// Classification of a crawled page, derived from its URL path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    Home,
    Contact,
    About,
    Legal,
    Other,
}

/// Descriptor of one successfully fetched page, kept on the site record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawledPage {
    pub url: String,
    #[serde(rename = "type")]
    pub page_type: PageType,
}

/// One contact value (email or phone) with the pages it was found on
///
/// Identity is `value` after normalization. `sources` is a deduplicated,
/// insertion-ordered list: it only ever grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub value: String,
    pub sources: Vec<String>,
}

impl ContactRecord {
    pub fn new(value: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            sources: vec![source.into()],
        }
    }

    /// Appends a source URL if it is not already attributed
    pub fn add_source(&mut self, source: &str) {
        if !self.sources.iter().any(|s| s == source) {
            self.sources.push(source.to_string());
        }
    }
}

/// The fixed set of social platforms we detect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Facebook,
    Linkedin,
    Instagram,
    Twitter,
    Youtube,
    Github,
    Pinterest,
    Tiktok,
    Snapchat,
    Houzz,
    Google,
    Yelp,
    Nextdoor,
}

impl Platform {
    /// All platforms, in detection order
    pub const ALL: [Platform; 13] = [
        Platform::Facebook,
        Platform::Linkedin,
        Platform::Instagram,
        Platform::Twitter,
        Platform::Youtube,
        Platform::Github,
        Platform::Pinterest,
        Platform::Tiktok,
        Platform::Snapchat,
        Platform::Houzz,
        Platform::Google,
        Platform::Yelp,
        Platform::Nextdoor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Linkedin => "linkedin",
            Platform::Instagram => "instagram",
            Platform::Twitter => "twitter",
            Platform::Youtube => "youtube",
            Platform::Github => "github",
            Platform::Pinterest => "pinterest",
            Platform::Tiktok => "tiktok",
            Platform::Snapchat => "snapchat",
            Platform::Houzz => "houzz",
            Platform::Google => "google",
            Platform::Yelp => "yelp",
            Platform::Nextdoor => "nextdoor",
        }
    }
}

/// Detected social profile URLs, one optional slot per platform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinterest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiktok: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapchat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub houzz: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yelp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nextdoor: Option<String>,
}

impl SocialLinks {
    pub fn get(&self, platform: Platform) -> Option<&str> {
        let slot = match platform {
            Platform::Facebook => &self.facebook,
            Platform::Linkedin => &self.linkedin,
            Platform::Instagram => &self.instagram,
            Platform::Twitter => &self.twitter,
            Platform::Youtube => &self.youtube,
            Platform::Github => &self.github,
            Platform::Pinterest => &self.pinterest,
            Platform::Tiktok => &self.tiktok,
            Platform::Snapchat => &self.snapchat,
            Platform::Houzz => &self.houzz,
            Platform::Google => &self.google,
            Platform::Yelp => &self.yelp,
            Platform::Nextdoor => &self.nextdoor,
        };
        slot.as_deref()
    }

    /// Overwrites the slot for a platform (within-page last-match-wins)
    pub fn set(&mut self, platform: Platform, url: String) {
        let slot = match platform {
            Platform::Facebook => &mut self.facebook,
            Platform::Linkedin => &mut self.linkedin,
            Platform::Instagram => &mut self.instagram,
            Platform::Twitter => &mut self.twitter,
            Platform::Youtube => &mut self.youtube,
            Platform::Github => &mut self.github,
            Platform::Pinterest => &mut self.pinterest,
            Platform::Tiktok => &mut self.tiktok,
            Platform::Snapchat => &mut self.snapchat,
            Platform::Houzz => &mut self.houzz,
            Platform::Google => &mut self.google,
            Platform::Yelp => &mut self.yelp,
            Platform::Nextdoor => &mut self.nextdoor,
        };
        *slot = Some(url);
    }
}

/// French legal-entity identifiers found on the site
///
/// Invariant: any non-null field has passed its checksum validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub siren: Option<String>,
    pub siret: Option<String>,
    pub tva: Option<String>,
    pub source: Option<String>,
}

impl CompanyInfo {
    pub fn is_empty(&self) -> bool {
        self.siren.is_none() && self.siret.is_none() && self.tva.is_none()
    }
}

/// The fixed set of technology categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TechCategory {
    Cms,
    FrameworksJs,
    FrameworksCss,
    Servers,
    Analytics,
    Marketing,
    Ecommerce,
    Performance,
    LibrariesJs,
    Fonts,
    Security,
    BuildTools,
    Mobile,
}

impl TechCategory {
    pub fn name(&self) -> &'static str {
        match self {
            TechCategory::Cms => "cms",
            TechCategory::FrameworksJs => "frameworks_js",
            TechCategory::FrameworksCss => "frameworks_css",
            TechCategory::Servers => "servers",
            TechCategory::Analytics => "analytics",
            TechCategory::Marketing => "marketing",
            TechCategory::Ecommerce => "ecommerce",
            TechCategory::Performance => "performance",
            TechCategory::LibrariesJs => "libraries_js",
            TechCategory::Fonts => "fonts",
            TechCategory::Security => "security",
            TechCategory::BuildTools => "build_tools",
            TechCategory::Mobile => "mobile",
        }
    }
}

/// Detected technologies, grouped by category
///
/// Empty categories are omitted from serialized output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechFingerprint {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cms: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frameworks_js: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frameworks_css: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub analytics: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marketing: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ecommerce: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub performance: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub libraries_js: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fonts: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub build_tools: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mobile: Vec<String>,
}

impl TechFingerprint {
    pub fn push(&mut self, category: TechCategory, technology: &str) {
        let bucket = match category {
            TechCategory::Cms => &mut self.cms,
            TechCategory::FrameworksJs => &mut self.frameworks_js,
            TechCategory::FrameworksCss => &mut self.frameworks_css,
            TechCategory::Servers => &mut self.servers,
            TechCategory::Analytics => &mut self.analytics,
            TechCategory::Marketing => &mut self.marketing,
            TechCategory::Ecommerce => &mut self.ecommerce,
            TechCategory::Performance => &mut self.performance,
            TechCategory::LibrariesJs => &mut self.libraries_js,
            TechCategory::Fonts => &mut self.fonts,
            TechCategory::Security => &mut self.security,
            TechCategory::BuildTools => &mut self.build_tools,
            TechCategory::Mobile => &mut self.mobile,
        };
        bucket.push(technology.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.categories().iter().all(|(_, techs)| techs.is_empty())
    }

    /// All categories with their detections, in the fixed category order
    pub fn categories(&self) -> [(&'static str, &Vec<String>); 13] {
        [
            ("cms", &self.cms),
            ("frameworks_js", &self.frameworks_js),
            ("frameworks_css", &self.frameworks_css),
            ("servers", &self.servers),
            ("analytics", &self.analytics),
            ("marketing", &self.marketing),
            ("ecommerce", &self.ecommerce),
            ("performance", &self.performance),
            ("libraries_js", &self.libraries_js),
            ("fonts", &self.fonts),
            ("security", &self.security),
            ("build_tools", &self.build_tools),
            ("mobile", &self.mobile),
        ]
    }
}

/// Interesting response headers from the first fingerprinted page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadersInfo {
    pub server: String,
    pub x_powered_by: String,
    pub content_type: String,
    pub content_encoding: String,
}

/// Security-related response headers from the first fingerprinted page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityHeaders {
    pub x_frame_options: String,
    pub x_xss_protection: String,
    pub x_content_type_options: String,
    pub content_security_policy: String,
    pub strict_transport_security: String,
    pub referrer_policy: String,
}

impl HeadersInfo {
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("server", &self.server),
            ("x_powered_by", &self.x_powered_by),
            ("content_type", &self.content_type),
            ("content_encoding", &self.content_encoding),
        ]
    }
}

impl SecurityHeaders {
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("x_frame_options", &self.x_frame_options),
            ("x_xss_protection", &self.x_xss_protection),
            ("x_content_type_options", &self.x_content_type_options),
            ("content_security_policy", &self.content_security_policy),
            ("strict_transport_security", &self.strict_transport_security),
            ("referrer_policy", &self.referrer_policy),
        ]
    }
}

/// The fully merged result for one site
///
/// This is the unit returned by the batch scheduler and the exact input
/// contract of the JSON and CSV serializers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteRecord {
    /// The normalized root URL the site was processed under
    pub domain: String,
    pub crawled_pages: Vec<CrawledPage>,
    pub emails: Vec<ContactRecord>,
    #[serde(rename = "phone_numbers")]
    pub phones: Vec<ContactRecord>,
    pub social_media: SocialLinks,
    pub technologies: TechFingerprint,
    pub headers_info: HeadersInfo,
    pub security_headers: SecurityHeaders,
    pub company_info: CompanyInfo,
}
