// src/models/hero.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::html::clean_html;

pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";
pub const BOOK_DEMO_LABEL: &str = "Book a Demo";
pub const BOOK_DEMO_PATH: &str = "/api/services/book-demo";

/// Query parameters describing the marketing panel for a service page.
#[derive(Debug, Deserialize, Validate)]
pub struct HeroParams {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(max = 500))]
    pub image_src: Option<String>,
}

/// Render-ready hero panel. It has no state; its one action is the demo link.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ServiceHero {
    pub title: String,
    pub description: String,
    pub image_src: String,
    /// Alt text of the background image.
    pub image_alt: String,
    pub cta_label: String,
    /// Relative URL that redirects to the scheduling page.
    pub cta_href: String,
}

impl From<HeroParams> for ServiceHero {
    fn from(params: HeroParams) -> Self {
        let title = clean_html(&params.title);
        let image_src = params
            .image_src
            .filter(|src| !src.trim().is_empty())
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

        Self {
            image_alt: title.clone(),
            title,
            description: clean_html(params.description.as_deref().unwrap_or_default()),
            image_src,
            cta_label: BOOK_DEMO_LABEL.to_string(),
            cta_href: BOOK_DEMO_PATH.to_string(),
        }
    }
}
