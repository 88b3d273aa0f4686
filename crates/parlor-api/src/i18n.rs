use std::fmt;
use std::str::FromStr;

/// Language of user-facing failure messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    Ar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    InvalidCredentials,
    UsernameTaken,
    MissingCredentials,
    Unauthorized,
    EmptyMessage,
}

impl Locale {
    pub fn text(self, text: Text) -> &'static str {
        match (self, text) {
            (Locale::En, Text::InvalidCredentials) => "Invalid username or password",
            (Locale::En, Text::UsernameTaken) => "Username already exists",
            (Locale::En, Text::MissingCredentials) => "Username and password are required",
            (Locale::En, Text::Unauthorized) => "Unauthorized",
            (Locale::En, Text::EmptyMessage) => "Message is empty",

            (Locale::Ar, Text::InvalidCredentials) => "اسم المستخدم أو كلمة المرور غير صحيحة",
            (Locale::Ar, Text::UsernameTaken) => "اسم المستخدم موجود بالفعل",
            (Locale::Ar, Text::MissingCredentials) => "اسم المستخدم وكلمة المرور مطلوبان",
            (Locale::Ar, Text::Unauthorized) => "غير مصرح",
            (Locale::Ar, Text::EmptyMessage) => "الرسالة فارغة",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct UnknownLocale(pub String);

impl fmt::Display for UnknownLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown locale '{}', expected 'en' or 'ar'", self.0)
    }
}

impl std::error::Error for UnknownLocale {}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "ar" => Ok(Locale::Ar),
            _ => Err(UnknownLocale(s.to_string())),
        }
    }
}
