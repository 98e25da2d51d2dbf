//! Public page contexts.
//!
//! Each public page is a JSON document: the page's own data plus the organisation profile,
//! which is read once per request and passed in explicitly.

use crate::constants::{
    HOME_GRADIENTS, HOME_PILLAR_ACTIVITIES, HOME_PILLAR_GALLERY, HOME_PROJECTS,
    PILLARS_PAGE_GALLERY, PLACEHOLDER_IMAGE, UNCATEGORIZED,
};
use crate::entities::{CoreValue, GalleryPhoto, MediaItem, OrganisationInfo, Pillar, Project};
use crate::service::SiteService;
use crate::SiteResult;
use becc_uuid::RecordId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// A page body together with the organisation profile.
#[derive(Clone, Debug, Serialize)]
pub struct PageContext<T> {
    pub organisation: Option<OrganisationInfo>,
    #[serde(flatten)]
    pub page: T,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GalleryImage {
    pub url: String,
    pub caption: String,
    pub title: String,
}

impl From<&MediaItem> for GalleryImage {
    fn from(item: &MediaItem) -> Self {
        Self {
            url: item.url().unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            caption: item.caption.clone(),
            title: item.title.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HomePillar {
    pub title: String,
    pub description: String,
    pub activities: Vec<String>,
    pub icon: String,
    pub gradient: &'static str,
    pub gallery_images: Vec<GalleryImage>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProjectCard {
    pub title: String,
    pub category: String,
    pub image: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HomePage {
    pub pillars: Vec<HomePillar>,
    pub projects: Vec<ProjectCard>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PillarSection {
    pub title: String,
    pub description: String,
    pub activities: Vec<String>,
    pub icon: String,
    pub gallery_images: Vec<GalleryImage>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PillarsPage {
    pub pillars: Vec<PillarSection>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProjectDetail {
    pub title: String,
    pub category: String,
    pub image: String,
    pub description: String,
    pub impact: Vec<String>,
    pub status: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProjectsPage {
    pub projects: Vec<ProjectDetail>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AboutPage {
    pub core_values: Vec<CoreValue>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GalleryCard {
    pub title: String,
    pub description: String,
    pub src: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GalleryPage {
    pub gallery_images: Vec<GalleryCard>,
}

fn gallery_head(pillar: &Pillar, n: usize) -> Vec<GalleryImage> {
    pillar.gallery.first_n(n).iter().map(GalleryImage::from).collect()
}

fn project_image(project: &Project) -> String {
    project
        .image
        .as_ref()
        .map(|m| m.url())
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
}

/// Pillar titles by id, for project categories.
fn categories(pillars: &[Pillar]) -> HashMap<&RecordId, &str> {
    pillars
        .iter()
        .map(|p| (&p.id, p.title.as_str()))
        .collect()
}

fn category_of(categories: &HashMap<&RecordId, &str>, project: &Project) -> String {
    categories
        .get(&project.pillar)
        .copied()
        .unwrap_or(UNCATEGORIZED)
        .to_string()
}

impl SiteService {
    fn page<T>(&self, page: T) -> SiteResult<PageContext<T>> {
        Ok(PageContext {
            organisation: self.organisation()?,
            page,
        })
    }

    pub fn home_page(&self) -> SiteResult<PageContext<HomePage>> {
        let pillars = self.list::<Pillar>()?;
        let projects = self.list::<Project>()?;
        let categories = categories(&pillars);

        let home_pillars = pillars
            .iter()
            .enumerate()
            .map(|(i, pillar)| HomePillar {
                title: pillar.title.to_string(),
                description: pillar.summary().to_string(),
                activities: pillar.activities.first_n(HOME_PILLAR_ACTIVITIES).to_vec(),
                icon: pillar.icon.clone(),
                gradient: HOME_GRADIENTS[i % HOME_GRADIENTS.len()],
                gallery_images: gallery_head(pillar, HOME_PILLAR_GALLERY),
            })
            .collect();

        let cards = projects
            .iter()
            .take(HOME_PROJECTS)
            .map(|project| ProjectCard {
                title: project.title.to_string(),
                category: category_of(&categories, project),
                image: project_image(project),
                description: project.description.to_string(),
            })
            .collect();

        self.page(HomePage {
            pillars: home_pillars,
            projects: cards,
        })
    }

    pub fn pillars_page(&self) -> SiteResult<PageContext<PillarsPage>> {
        let pillars = self
            .list::<Pillar>()?
            .iter()
            .map(|pillar| PillarSection {
                title: pillar.title.to_string(),
                description: pillar.summary().to_string(),
                activities: pillar.activities.items().to_vec(),
                icon: pillar.icon.clone(),
                gallery_images: gallery_head(pillar, PILLARS_PAGE_GALLERY),
            })
            .collect();
        self.page(PillarsPage { pillars })
    }

    pub fn projects_page(&self) -> SiteResult<PageContext<ProjectsPage>> {
        let pillars = self.list::<Pillar>()?;
        let categories = categories(&pillars);
        let projects = self
            .list::<Project>()?
            .iter()
            .map(|project| ProjectDetail {
                title: project.title.to_string(),
                category: category_of(&categories, project),
                image: project_image(project),
                description: project.description.to_string(),
                impact: project.impact.items().to_vec(),
                status: project.status_display(),
            })
            .collect();
        self.page(ProjectsPage { projects })
    }

    pub fn about_page(&self) -> SiteResult<PageContext<AboutPage>> {
        let organisation = self.organisation()?;
        let core_values = organisation
            .as_ref()
            .map(|o| o.core_values.items().to_vec())
            .unwrap_or_default();
        Ok(PageContext {
            organisation,
            page: AboutPage { core_values },
        })
    }

    pub fn gallery_page(&self) -> SiteResult<PageContext<GalleryPage>> {
        let gallery_images = self
            .list::<GalleryPhoto>()?
            .into_iter()
            .map(|photo| GalleryCard {
                src: photo.image.url(),
                title: photo.title.to_string(),
                description: photo.description,
                uploaded_at: photo.uploaded_at,
            })
            .collect();
        self.page(GalleryPage { gallery_images })
    }
}
