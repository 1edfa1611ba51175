//! Static pattern data for phone-number detection
//!
//! These tables are configuration, not logic: multilingual label words
//! that mark a number as a phone, shapes that mark a digit run as
//! definitely-not-a-phone, and the international dial codes accepted by
//! the generic phone pattern.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Label words that commonly precede a phone number, one alternation
/// group per language
pub static PHONE_KEYWORDS: &[&str] = &[
    // French
    "tel|tél|telephone|téléphone|mobile|portable|fax|standard|numéro|numero|contact|appel|urgence|service|hotline|assistance|bureau|direct|fixe|accueil",
    // English
    "phone|cell|mobile|contact|call|fax|dial|number|hotline|support|office|desk|extension|ext|emergency|service|direct|line|reach|reception|switchboard",
    // German
    "telefon|handy|mobil|fax|rufnummer|durchwahl|notfall|büro|zentrale|anruf|kontakt|service|festnetz",
    // Spanish
    "teléfono|tel|móvil|celular|fijo|fax|llamada|contacto|urgencia|oficina|directo|servicio|central|recepción",
    // Italian
    "telefono|cellulare|mobile|fisso|fax|chiamata|contatto|urgenza|ufficio|diretto|servizio|centralino",
    // Portuguese
    "telefone|celular|móvel|fixo|fax|chamada|contato|urgência|escritório|direto|serviço|central",
    // Dutch
    "telefoon|mobiel|vast|fax|nummer|contact|noodgeval|kantoor|direct|service|centraal",
    // Polish
    "telefon|komórka|komorkowy|faks|numer|kontakt|nagły|biuro|bezpośredni|serwis|centrala",
    // Russian
    "телефон|мобильный|сотовый|факс|номер|контакт|экстренный|офис|прямой|сервис|центральный",
    // Chinese
    "电话|手机|传真|号码|联系|紧急|办公室|直线|服务|总机",
    // Japanese
    "電話|携帯|ファックス|番号|連絡|緊急|事務所|直通|サービス|代表",
    // Korean
    "전화|휴대폰|팩스|번호|연락처|긴급|사무실|직통|서비스|대표",
    // Arabic
    "هاتف|جوال|فاكس|رقم|اتصال|طوارئ|مكتب|مباشر|خدمة|مركز",
    // Turkish
    "telefon|cep|faks|numara|iletişim|acil|ofis|direkt|servis|santral",
    // Swedish
    "telefon|mobil|fax|nummer|kontakt|nödfall|kontor|direkt|service|växel",
    // Danish
    "telefon|mobil|fax|nummer|kontakt|nødsituation|kontor|direkte|service|central",
    // Finnish
    "puhelin|mobiili|faksi|numero|yhteystieto|hätä|toimisto|suora|palvelu|keskus",
    // Vietnamese
    "điện thoại|di động|fax|số|liên hệ|khẩn cấp|văn phòng|trực tiếp|dịch vụ|tổng đài",
    // Hindi
    "फोन|मोबाइल|फैक्स|नंबर|संपर्क|आपातकालीन|कार्यालय|सीधा|सेवा|केंद्रीय",
    // Indonesian
    "telepon|ponsel|faks|nomor|kontak|darurat|kantor|langsung|layanan|sentral",
    // Generic abbreviations
    "gsm|voip|pbx|pabx|ip-phone|dect|callback|callcenter|helpline|helpdesk|info|support|contact",
    // Messaging and calling apps
    "whatsapp|viber|telegram|signal|wechat|line|skype|zoom|teams|messenger",
    // Phone symbols
    "☎|📞|📱|📲|✆|℡",
];

/// Digit-run shapes that are never phone numbers (IDs, timestamps,
/// dates, CSS measurements, UUIDs, version strings, color codes)
pub static EXCLUDE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^\d{10}$",
        r"\d{13}",
        r"\d{10}\.?\d*",
        r"(?:19|20)\d{2}(?:0[1-9]|1[0-2])(?:0[1-9]|[12]\d|3[01])",
        r"area[-_]?\d+",
        r"v\d+",
        r"id[-_]?\d+",
        r"[a-zA-Z][-_]?\d+",
        r"\d+\.?\d*[x×]\d+\.?\d*",
        r"\d+\.?\d*(?:px|em|rem|%|pt|ms)",
        r"\d+\.?\d*(?:kb|mb|gb|tb)",
        r"#\d+",
        r"rgb\(\d+,\s*\d+,\s*\d+\)",
        r"rgba\(\d+,\s*\d+,\s*\d+,\s*[\d.]+\)",
        r"\d+\s*x\s*\d+\s*(?:px|pixels)?",
        r"[a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12}",
        r"(?:v|version|ver)[-_. ]?\d+(?:\.\d+)*",
        r"r\d+",
        r"(?:page|p)[-_]?\d+",
        r"(?:size|width|height|top|left|right|bottom|padding|margin)[-_]?\d+",
        r"(?:row|col)[-_]?\d+",
        r"index[-_]?\d+",
        r"item[-_]?\d+",
        r"section[-_]?\d+",
        r"timestamp[-_]?\d+",
        r"added(?:on|at)[-_]?\d+",
        r"modified(?:on|at)[-_]?\d+",
        r"created(?:on|at)[-_]?\d+",
        r"updated(?:on|at)[-_]?\d+",
    ]
    .iter()
    .map(|p| {
        RegexBuilder::new(p)
            .case_insensitive(true)
            .build()
            .unwrap()
    })
    .collect()
});

/// Field-name fragments that disqualify a candidate when they appear in
/// the 5-character window before or after it
pub static SUSPICIOUS_CONTEXT: &[&str] = &[
    "id", "version", "timestamp", "date", "time", "size", "width", "height", "index", "item",
    "row", "col",
];

/// International dial codes accepted by the generic phone pattern,
/// as a ready-made regex alternation
pub static COUNTRY_DIAL_CODES: &str = concat!(
    "93|355|213|376|244|54|374|61|43|994|973|880|375|32|229|975|591|387|267|55|673|359|226|257|",
    "855|237|1|238|236|235|56|86|57|269|242|243|506|385|53|357|420|45|253|593|20|503|240|291|",
    "372|251|679|358|33|241|220|995|49|233|30|299|502|224|245|592|509|504|852|36|354|91|62|98|",
    "964|353|972|39|225|81|962|7|254|686|850|82|965|996|856|371|961|266|231|218|423|370|352|",
    "853|389|261|265|60|960|223|356|692|222|230|52|691|373|377|976|382|212|258|95|264|674|977|",
    "31|64|505|227|234|47|968|92|680|970|507|675|595|51|63|48|351|974|40|250|685|378|239|966|",
    "221|381|248|232|65|421|386|677|252|27|211|34|94|249|597|268|46|41|963|886|992|255|66|670|",
    "228|676|216|90|993|688|256|380|971|44|598|998|678|58|84|967|260|263"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclude_patterns_compile() {
        assert!(!EXCLUDE_PATTERNS.is_empty());
    }

    #[test]
    fn test_timestamp_shape_excluded() {
        assert!(EXCLUDE_PATTERNS.iter().any(|p| p.is_match("1692787200000")));
    }

    #[test]
    fn test_dial_codes_include_france() {
        assert!(COUNTRY_DIAL_CODES.split('|').any(|c| c == "33"));
    }
}
