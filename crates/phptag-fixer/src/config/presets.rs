//! Fixer presets (PSR-12, Symfony, etc.)
//!
//! Maps PHP-CS-Fixer preset names to the rules of theirs this crate implements.

/// Available presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Psr12,
    PerCs,
    Symfony,
    PhpCsFixer,
}

impl Preset {
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "psr12" | "psr-12" | "@psr12" | "@psr-12" => Some(Preset::Psr12),
            "per" | "per-cs" | "percs" | "@per" | "@per-cs" => Some(Preset::PerCs),
            "symfony" | "@symfony" => Some(Preset::Symfony),
            "phpcsfixer" | "php_cs_fixer" | "@phpcsfixer" => Some(Preset::PhpCsFixer),
            _ => None,
        }
    }

    pub fn rules(self) -> &'static [&'static str] {
        match self {
            // Neither standard says anything about echo tags
            Preset::Psr12 | Preset::PerCs => &[],
            Preset::Symfony | Preset::PhpCsFixer => SYMFONY_RULES,
        }
    }
}

/// Get the list of rules for a preset
pub fn get_preset_rules(preset_name: &str) -> &'static [&'static str] {
    Preset::from_name(preset_name).map(Preset::rules).unwrap_or(&[])
}

/// Symfony preset rules (also part of @PhpCsFixer)
pub const SYMFONY_RULES: &[&str] = &["echo_tag_syntax"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names() {
        assert_eq!(Preset::from_name("@Symfony"), Some(Preset::Symfony));
        assert_eq!(Preset::from_name("PSR-12"), Some(Preset::Psr12));
        assert_eq!(Preset::from_name("@PhpCsFixer"), Some(Preset::PhpCsFixer));
        assert_eq!(Preset::from_name("laravel"), None);
    }

    #[test]
    fn test_preset_rules() {
        assert!(get_preset_rules("Symfony").contains(&"echo_tag_syntax"));
        assert!(get_preset_rules("PhpCsFixer").contains(&"echo_tag_syntax"));
        assert!(get_preset_rules("PSR12").is_empty());
        assert!(get_preset_rules("unknown").is_empty());
    }
}
