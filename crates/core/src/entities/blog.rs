use super::{checkbox_value, id_value, keep_id, media_value, missing_choice, EntityForm};
use crate::config::ListLimits;
use crate::constants::{BLOG_COLLECTION, CATEGORY_MAX_CHARS, LONG_TEXT_MAX_CHARS, SHORT_TEXT_MAX_CHARS};
use crate::entities::TeamMember;
use crate::forms::{FormBinder, FormData, FormErrors, FormRejection};
use crate::service::SiteService;
use crate::store::Record;
use crate::SiteResult;
use becc_types::{MediaRef, NonEmptyText, Slug, TextError};
use becc_uuid::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: RecordId,
    pub title: NonEmptyText,
    /// Unique across posts.
    pub slug: Slug,
    #[serde(default)]
    pub author: Option<RecordId>,
    pub content: NonEmptyText,
    #[serde(default)]
    pub image: Option<MediaRef>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

impl Record for BlogPost {
    const COLLECTION: &'static str = BLOG_COLLECTION;
    const SINGULAR: &'static str = "Blog post";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn cmp_for_listing(&self, other: &Self) -> Ordering {
        self.title.cmp(&other.title)
    }
}

impl EntityForm for BlogPost {
    fn seed(&self) -> SiteResult<FormData> {
        Ok(FormData::new()
            .with("title", self.title.as_str())
            .with("slug", self.slug.as_str())
            .with("author", id_value(self.author.as_ref()))
            .with("content", self.content.as_str())
            .with("image", media_value(self.image.as_ref()))
            .with("category", self.category.as_str())
            .with("published", checkbox_value(self.published)))
    }

    /// A blank slug is derived from the title.
    fn bind(
        data: &FormData,
        limits: ListLimits,
        existing: Option<&Self>,
    ) -> Result<Self, FormRejection> {
        let mut form = FormBinder::new(data, limits);
        let title = form.required_text("title", SHORT_TEXT_MAX_CHARS);
        let slug_input = form.optional_text("slug", Slug::MAX_LEN);
        let author = form.optional_reference("author");
        let content = form.required_text("content", LONG_TEXT_MAX_CHARS);
        let image = form.optional_media("image");
        let category = form.optional_text("category", CATEGORY_MAX_CHARS);
        let published = form.checkbox("published");

        let slug = match (&title, slug_input.is_empty()) {
            (_, false) => Slug::parse(&slug_input).map(Some),
            (Some(title), true) => Slug::from_title(title.as_str()).map(Some),
            (None, true) => Ok(None),
        };
        let slug = match slug {
            Ok(slug) => slug,
            Err(TextError::InvalidSlug) => {
                form.add_error(
                    "slug",
                    "Enter a valid slug consisting of lowercase letters, numbers, underscores or hyphens.",
                );
                None
            }
            Err(e) => {
                form.add_error("slug", format!("{e}."));
                None
            }
        };

        match (title, slug, content) {
            (Some(title), Some(slug), Some(content)) if form.is_clean() => Ok(Self {
                id: keep_id(existing),
                title,
                slug,
                author,
                content,
                image,
                category,
                published,
                created_at: existing.map(|p| p.created_at).unwrap_or_else(Utc::now),
            }),
            _ => Err(form.into_rejection()),
        }
    }

    fn check_relations(&self, site: &SiteService) -> SiteResult<FormErrors> {
        let mut errors = FormErrors::default();
        if let Some(author) = &self.author {
            if !site.exists::<TeamMember>(author) {
                missing_choice(&mut errors, "author");
            }
        }
        let taken = site
            .list::<BlogPost>()?
            .into_iter()
            .any(|post| post.slug == self.slug && post.id != self.id);
        if taken {
            errors.add("slug", "Blog post with this Slug already exists.");
        }
        Ok(errors)
    }
}
