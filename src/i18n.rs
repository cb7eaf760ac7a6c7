//! UI message catalog
//!
//! Keys follow the `section.name` convention of the service's client
//! apps. Lookups that miss fall back to the key itself so a typo shows
//! up on screen instead of panicking.

/// Supported UI languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    /// Parse a language tag like "en" or "fr-CD"
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.split(['-', '_']).next().unwrap_or("") {
            t if t.eq_ignore_ascii_case("en") => Some(Locale::En),
            t if t.eq_ignore_ascii_case("fr") => Some(Locale::Fr),
            _ => None,
        }
    }
}

/// Translation provider handed to every screen
#[derive(Debug, Clone, Copy, Default)]
pub struct Translations {
    locale: Locale,
}

impl Translations {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Build from a config language tag, defaulting to English
    pub fn from_tag(tag: &str) -> Self {
        Self::new(Locale::from_tag(tag).unwrap_or_default())
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Look up a message by key
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        let text = match self.locale {
            Locale::En => en(key),
            Locale::Fr => fr(key),
        };
        text.unwrap_or(key)
    }
}

fn en(key: &str) -> Option<&'static str> {
    Some(match key {
        "messages.phone" => "Phone number",
        "messages.authenticate" => "Authenticate",
        "messages.confirmation" => "Confirmation",
        "messages.code" => "One-time passcode",
        "messages.displayName" => "Display name",
        "messages.register" => "Create account",
        "auth.checkPhone" => "Check the phone number",
        "auth.confirmPhone" => "confirm this phone number",
        "auth.otpSent" => "A one-time passcode was requested for",
        "auth.newAccount" => "No account for this number yet. Complete the form to create one.",
        "auth.requesting" => "Requesting passcode...",
        "auth.requestCancelled" => "Passcode request cancelled",
        "auth.requestFailed" => "Passcode request failed",
        _ => return None,
    })
}

fn fr(key: &str) -> Option<&'static str> {
    Some(match key {
        "messages.phone" => "Numéro de téléphone",
        "messages.authenticate" => "S'authentifier",
        "messages.confirmation" => "Confirmation",
        "messages.code" => "Code à usage unique",
        "messages.displayName" => "Nom affiché",
        "messages.register" => "Créer un compte",
        "auth.checkPhone" => "Vérifiez le numéro de téléphone",
        "auth.confirmPhone" => "confirmez ce numéro de téléphone",
        "auth.otpSent" => "Un code à usage unique a été demandé pour",
        "auth.newAccount" => "Aucun compte pour ce numéro. Remplissez le formulaire pour en créer un.",
        "auth.requesting" => "Demande du code en cours...",
        "auth.requestCancelled" => "Demande de code annulée",
        "auth.requestFailed" => "Échec de la demande de code",
        _ => return None,
    })
}
