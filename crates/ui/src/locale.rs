use leafdoctor_diagnosis::Language;

/// Assistant panel title; the deployment shows it untranslated in both
/// languages.
pub const ASSISTANT_TITLE: &str = "AI Plant Expert";

/// Copy for one home-page feature card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureCopy {
    pub title: &'static str,
    pub detail: &'static str,
}

/// Fixed display strings for one language.
///
/// Plain data keyed by [`Language`]; the widget and pages read it, nothing
/// writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleStrings {
    pub app_title: &'static str,
    pub subtitle: &'static str,
    pub upload_button: &'static str,
    pub camera_button: &'static str,
    pub real_results: &'static str,
    pub features: [FeatureCopy; 3],
    pub assistant_placeholder: &'static str,
    pub assistant_apology: &'static str,
    pub language_label: &'static str,
}

const EN: LocaleStrings = LocaleStrings {
    app_title: "AI Plant Doctor",
    subtitle: "Detect plant diseases instantly with AI-powered analysis",
    upload_button: "Upload Image",
    camera_button: "Take Photo",
    real_results: "Real Results",
    features: [
        FeatureCopy {
            title: "AI-Powered",
            detail: "94%+ accuracy",
        },
        FeatureCopy {
            title: "Explainable AI",
            detail: "Visual heatmaps",
        },
        FeatureCopy {
            title: "Expert Chat",
            detail: "Ask follow-ups",
        },
    ],
    assistant_placeholder: "Ask about plant diseases...",
    assistant_apology: "Server error. Please try again.",
    language_label: "English",
};

const HI: LocaleStrings = LocaleStrings {
    app_title: "एआई प्लांट डॉक्टर",
    subtitle: "एआई-संचालित विश्लेषण के साथ तुरंत पौधों की बीमारियों का पता लगाएं",
    upload_button: "तस्वीर अपलोड करें",
    camera_button: "फोटो लें",
    real_results: "वास्तविक परिणाम",
    features: [
        FeatureCopy {
            title: "एआई संचालित",
            detail: "94%+ सटीकता",
        },
        FeatureCopy {
            title: "व्याख्या योग्य एआई",
            detail: "हीटमैप दिखाते हैं",
        },
        FeatureCopy {
            title: "विशेषज्ञ चैट",
            detail: "अनुवर्ती प्रश्न पूछें",
        },
    ],
    assistant_placeholder: "पौधों की बीमारी के बारे में पूछें...",
    assistant_apology: "सर्वर त्रुटि, कृपया पुनः प्रयास करें।",
    language_label: "हिंदी",
};

/// Looks up the string table for `language`.
pub const fn strings(language: Language) -> &'static LocaleStrings {
    match language {
        Language::En => &EN,
        Language::Hi => &HI,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_languages_carry_complete_tables() {
        for language in [Language::En, Language::Hi] {
            let table = strings(language);
            assert!(!table.app_title.is_empty());
            assert!(!table.assistant_placeholder.is_empty());
            assert!(!table.assistant_apology.is_empty());
            for feature in table.features {
                assert!(!feature.title.is_empty());
                assert!(!feature.detail.is_empty());
            }
        }
    }

    #[test]
    fn apology_strings_are_the_fixed_per_language_values() {
        assert_eq!(
            strings(Language::En).assistant_apology,
            "Server error. Please try again."
        );
        assert_eq!(
            strings(Language::Hi).assistant_apology,
            "सर्वर त्रुटि, कृपया पुनः प्रयास करें।"
        );
    }

    #[test]
    fn language_tables_are_distinct() {
        assert_ne!(strings(Language::En), strings(Language::Hi));
    }
}
