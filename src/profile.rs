//! Static biographical content shown around the CMS-driven sections.
//!
//! The built-in profile is used unless `PROFILE_PATH` points at a JSON file
//! with the same shape. Missing fields in that file keep their built-in
//! values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub model_name: String,
    pub full_name: String,
    pub location: String,
    pub tagline: String,
    pub introduction: String,
    pub started_modeling: String,
    pub why_model: String,
    pub modeling_types: Vec<String>,
    pub style_description: String,
    pub meaning_of_fashion: String,
    pub uniqueness: String,
    pub dreams: String,
    pub fashion_quotes: Vec<String>,
    pub short_quote: String,
    pub extended_bio: String,
    pub team: Vec<TeamMember>,
    pub contact: Contact,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub image_src: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Contact {
    pub email: String,
    pub whatsapp_url: Option<String>,
    pub tiktok: Option<String>,
    pub instagram: Option<String>,
}

impl Profile {
    /// Read a profile from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let profile_error = |reason: String| ConfigError::Profile {
            path: path.display().to_string(),
            reason,
        };
        let raw = std::fs::read_to_string(path).map_err(|e| profile_error(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| profile_error(e.to_string()))
    }

    /// The configured profile, or the built-in one when no path is set.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            model_name: "Ntinyari Hope".into(),
            full_name: "Hope Ntinyari Koome".into(),
            location: "Nairobi, Kenya".into(),
            tagline: "I'm a fashion enthusiast who believes fashion is more than just clothes \
                      but how it makes you feel. Every outfit is a story. Every style is a statement."
                .into(),
            introduction: "Hey I'm Ntinyari Hope a fashion enthusiast, model and style storyteller. \
                           I see fashion as more than just clothes, it's a language I use to express \
                           confidence, creativity and individuality."
                .into(),
            started_modeling: "Modelling and fashion has always been in me since childhood, \
                               its not a phase, it's a part of me."
                .into(),
            why_model: "Modelling has always been part of me, not something I've discovered but \
                        something I've always known. Since childhood I've been drawn to the art of \
                        fashion and expression and with time that inner spark grew into purpose \
                        nurtured by the unwavering support from my mum."
                .into(),
            modeling_types: strings(&["Runway", "Commercial", "Beauty", "Fitness"]),
            style_description: "Bold, elegant and timeless".into(),
            meaning_of_fashion: "Fashion is my whole personality. I feel like every outfit I put on \
                                 is a love letter to my past me, my present me and my future me."
                .into(),
            uniqueness: "My uniqueness lies in how I see fashion beyond clothes. It's confidence, \
                         storytelling and self expression."
                .into(),
            dreams: "Travel, style people, inspire young girls and walk shows.".into(),
            fashion_quotes: strings(&[
                "Confidence is the best accessory one could wear.",
                "If you can't beat your competitor just dress better.",
                "Fashion is more than clothes; it's a story only the bold ones can clearly tell.",
            ]),
            short_quote: "You can have anything in life if you dress for it.".into(),
            extended_bio: "I'm a fashion enthusiast who believes fashion is more than just clothes \
                           but how it makes you feel. Every outfit is a story. Every style is a \
                           statement. Through modelling and styling, I bring my vision of \
                           confidence, beauty and authenticity to life."
                .into(),
            team: vec![
                TeamMember::new("Chidi Eze", "Makeup Artist", "/images/team1.png"),
                TeamMember::new("Drew Feig", "Photographer", "/images/team2.png"),
                TeamMember::new("Harper Russo", "Creative Director", "/images/team3.png"),
                TeamMember::new("Jamie Chastain", "Stylist", "/images/team4.png"),
            ],
            contact: Contact {
                email: "ntinyarihope1@gmail.com".into(),
                whatsapp_url: Some("https://wa.me/254792822887".into()),
                tiktok: Some("https://tiktok.com/@ntinyarihope".into()),
                instagram: None,
            },
        }
    }
}

impl TeamMember {
    fn new(name: &str, role: &str, image_src: &str) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            image_src: image_src.into(),
        }
    }
}
