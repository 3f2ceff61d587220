//! Site content: everything the pages display that isn't fetched live.
//!
//! Content is a TOML document.  A default document is compiled into the
//! binary; `--content <path>` swaps in another one.  Links are parsed into
//! [`Url`]s and required text fields are checked here, once, so the pages
//! never see a malformed record.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use super::carousel::{Carousel, CarouselItem};

const BUILTIN: &str = include_str!("../../assets/site.toml");

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("invalid site content: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{section}: `{field}` must not be blank")]
    BlankField {
        section: &'static str,
        field: &'static str,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteContent {
    pub owner: String,
    #[serde(default)]
    pub hero: Hero,
    pub about: About,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default)]
    pub coursework: Vec<CarouselItem>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub uses: Vec<UsesSection>,
    #[serde(default)]
    pub footer_links: Vec<FooterLink>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Hero {
    #[serde(default)]
    pub phrases: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct About {
    #[serde(default = "About::default_title")]
    pub title: String,
    #[serde(default)]
    pub paragraphs: Vec<String>,
}

impl About {
    fn default_title() -> String {
        "About Me".into()
    }
}

/// Languages shown in the proficiency widget, in display order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Skills {
    #[serde(default)]
    pub relevant: Vec<String>,
}

/// A showcase entry: a slide plus optional body and footer text.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    #[serde(flatten)]
    pub item: CarouselItem,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub footer: Option<String>,
}

impl AsRef<CarouselItem> for Project {
    fn as_ref(&self) -> &CarouselItem {
        &self.item
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsesSection {
    pub title: String,
    #[serde(default)]
    pub items: Vec<UsesItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsesItem {
    pub label: String,
    pub detail: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FooterLink {
    pub title: String,
    pub url: Url,
}

impl SiteContent {
    /// The document compiled into the binary.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_toml(BUILTIN)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("loading {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self, ContentError> {
        let content: SiteContent = toml::from_str(raw)?;
        content.validate()?;
        Ok(content)
    }

    fn validate(&self) -> Result<(), ContentError> {
        if self.owner.trim().is_empty() {
            return Err(ContentError::BlankField { section: "site", field: "owner" });
        }
        let slides = self
            .coursework
            .iter()
            .map(|c| ("coursework", c))
            .chain(self.projects.iter().map(|p| ("projects", &p.item)));
        for (section, item) in slides {
            if item.title.trim().is_empty() {
                return Err(ContentError::BlankField { section, field: "title" });
            }
        }
        Ok(())
    }

    /// Coursework slides, or `None` when the list is empty (no carousel is
    /// shown in that case).
    pub fn coursework_carousel(&self) -> Option<Carousel<CarouselItem>> {
        non_empty_carousel(self.coursework.clone())
    }

    pub fn projects_carousel(&self) -> Option<Carousel<Project>> {
        non_empty_carousel(self.projects.clone())
    }
}

fn non_empty_carousel<T>(items: Vec<T>) -> Option<Carousel<T>> {
    match Carousel::new(items) {
        Ok(c) => Some(c),
        Err(e) => {
            tracing::debug!("carousel hidden: {e}");
            None
        }
    }
}
