use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
    Fr,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub dir: &'static str,
    pub title: &'static str,
    pub dashboard: &'static str,
    pub upload: &'static str,
    pub result: &'static str,
}

impl Language {
    pub fn translation(&self) -> Translation {
        match self {
            Language::En => Translation {
                dir: "ltr",
                title: "AQUA-R",
                dashboard: "Dashboard",
                upload: "Upload & Analyze",
                result: "Analysis Result",
            },
            Language::Ar => Translation {
                dir: "rtl",
                title: "أكوا-آر",
                dashboard: "لوحة التحكم",
                upload: "رفع وتحليل",
                result: "نتيجة التحليل",
            },
            Language::Fr => Translation {
                dir: "ltr",
                title: "AQUA-R",
                dashboard: "Tableau de bord",
                upload: "Télécharger",
                result: "Résultat",
            },
        }
    }
}

impl FromStr for Language {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "ar" => Ok(Language::Ar),
            "fr" => Ok(Language::Fr),
            _ => Err(()),
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self {
            Language::En => "en",
            Language::Ar => "ar",
            Language::Fr => "fr",
        })
    }
}
