//! Site operations used by the HTTP layer and the CLI.
//!
//! [`SiteService`] is cheap to clone and holds only the shared [`CoreConfig`]; every call
//! goes to the record store, so two services over the same directory see the same data.

use crate::config::CoreConfig;
use crate::entities::{
    ContactMessage, Donation, EntityForm, Event, OrganisationInfo, Partner, Project,
    ProjectStatus, VolunteerApplication,
};
use crate::forms::{format_minor_units, FormData, FormRejection};
use crate::store::{OrganisationStore, Record, RecordStore};
use crate::{SiteError, SiteResult};
use becc_uuid::RecordId;
use serde::Serialize;
use std::sync::Arc;

/// Counts shown on the dashboard landing page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub projects_count: usize,
    pub active_projects: usize,
    pub completed_projects: usize,
    pub events_count: usize,
    pub partners_count: usize,
    pub volunteers_count: usize,
    pub total_donations_minor: i64,
    /// `total_donations_minor` formatted as `1234.50`.
    pub total_donations: String,
}

/// Record operations - no HTTP concerns
#[derive(Clone, Debug)]
pub struct SiteService {
    cfg: Arc<CoreConfig>,
}

impl SiteService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    pub fn store<R: Record>(&self) -> RecordStore<R> {
        RecordStore::new(&self.cfg)
    }

    pub fn organisation_store(&self) -> OrganisationStore {
        OrganisationStore::new(&self.cfg)
    }

    pub fn list<R: Record>(&self) -> SiteResult<Vec<R>> {
        self.store::<R>().list()
    }

    pub fn get<R: Record>(&self, id: &RecordId) -> SiteResult<R> {
        self.store::<R>().get(id)
    }

    pub fn exists<R: Record>(&self, id: &RecordId) -> bool {
        self.store::<R>().exists(id)
    }

    /// Initial values for a create form.
    pub fn blank_form<R: EntityForm>(&self) -> FormData {
        R::blank()
    }

    /// Initial values for an edit form, seeded from the stored record.
    pub fn edit_form<R: EntityForm>(&self, id: &RecordId) -> SiteResult<FormData> {
        self.get::<R>(id)?.seed()
    }

    /// Binds a submission into a new record and stores it.
    ///
    /// # Errors
    ///
    /// [`SiteError::Validation`] when any field, list field or relation is invalid; nothing
    /// is written in that case.
    pub fn create<R: EntityForm>(&self, data: &FormData) -> SiteResult<R> {
        let record = R::bind(data, self.cfg.list_limits(), None)?;
        self.ensure_relations(&record, data)?;
        self.store::<R>().insert(&record)?;
        tracing::info!(collection = R::COLLECTION, id = %record.id(), "record created");
        Ok(record)
    }

    /// Binds a submission over an existing record and replaces it wholesale.
    ///
    /// The stored record is untouched unless the whole submission is valid.
    pub fn update<R: EntityForm>(&self, id: &RecordId, data: &FormData) -> SiteResult<R> {
        let store = self.store::<R>();
        let existing = store.get(id)?;
        let record = R::bind(data, self.cfg.list_limits(), Some(&existing))?;
        self.ensure_relations(&record, data)?;
        store.update(&record)?;
        tracing::info!(collection = R::COLLECTION, id = %record.id(), "record updated");
        Ok(record)
    }

    /// Deletes a record after running its cascade, returning the deleted record.
    pub fn delete<R: EntityForm>(&self, id: &RecordId) -> SiteResult<R> {
        let store = self.store::<R>();
        let record = store.get(id)?;
        record.cascade_delete(self)?;
        store.delete(id)?;
        tracing::info!(collection = R::COLLECTION, id = %id, "record deleted");
        Ok(record)
    }

    fn ensure_relations<R: EntityForm>(&self, record: &R, data: &FormData) -> SiteResult<()> {
        let errors = record.check_relations(self)?;
        if errors.is_empty() {
            Ok(())
        } else {
            Err(SiteError::Validation(FormRejection::new(
                errors,
                data.clone(),
            )))
        }
    }

    /// The organisation profile, or `None` before one has been saved.
    pub fn organisation(&self) -> SiteResult<Option<OrganisationInfo>> {
        self.organisation_store().load()
    }

    pub fn organisation_form(&self) -> SiteResult<FormData> {
        match self.organisation()? {
            Some(info) => info.seed(),
            None => Ok(OrganisationInfo::blank()),
        }
    }

    pub fn save_organisation(&self, data: &FormData) -> SiteResult<OrganisationInfo> {
        let info = OrganisationInfo::bind(data, self.cfg.list_limits())?;
        self.organisation_store().save(&info)?;
        tracing::info!("organisation profile saved");
        Ok(info)
    }

    /// Public contact form.
    pub fn submit_contact(&self, data: &FormData) -> SiteResult<ContactMessage> {
        self.create::<ContactMessage>(data)
    }

    /// Public volunteer form. Applications always start unapproved.
    pub fn submit_volunteer(&self, data: &FormData) -> SiteResult<VolunteerApplication> {
        let mut data = data.clone();
        data.insert("approved", "");
        self.create::<VolunteerApplication>(&data)
    }

    pub fn dashboard_stats(&self) -> SiteResult<DashboardStats> {
        let projects = self.list::<Project>()?;
        let count_status =
            |status: ProjectStatus| projects.iter().filter(|p| p.status == status).count();
        let total_donations_minor = self
            .list::<Donation>()?
            .iter()
            .map(|d| d.amount_minor)
            .sum();

        Ok(DashboardStats {
            projects_count: projects.len(),
            active_projects: count_status(ProjectStatus::Active),
            completed_projects: count_status(ProjectStatus::Completed),
            events_count: self.store::<Event>().count()?,
            partners_count: self.store::<Partner>().count()?,
            volunteers_count: self.store::<VolunteerApplication>().count()?,
            total_donations_minor,
            total_donations: format_minor_units(total_donations_minor),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ListLimits;
    use crate::entities::{BlogPost, GalleryPhoto, Pillar, TeamMember};
    use crate::forms::FormData;
    use tempfile::TempDir;

    fn service(temp: &TempDir) -> SiteService {
        let cfg = CoreConfig::new(
            temp.path().to_path_buf(),
            temp.path().join("media"),
            ListLimits::default(),
        )
        .unwrap();
        SiteService::new(Arc::new(cfg))
    }

    fn pillar_form(title: &str) -> FormData {
        FormData::new()
            .with("title", title)
            .with("description", "Protecting springs.")
            .with("activities_json", r#"["x","y","z"]"#)
    }

    fn project_form(pillar: &RecordId, status: &str) -> FormData {
        FormData::new()
            .with("title", "Spring protection")
            .with("pillar", pillar.to_string())
            .with("description", "Protecting community springs.")
            .with("start_date", "2024-03-01")
            .with("location", "Kisumu")
            .with("status", status)
    }

    #[test]
    fn edit_form_round_trip_keeps_list_order() {
        let temp = TempDir::new().unwrap();
        let site = service(&temp);
        let pillar = site.create::<Pillar>(&pillar_form("Water")).unwrap();

        let seeded = site.edit_form::<Pillar>(&pillar.id).unwrap();
        assert_eq!(seeded.get("activities_json"), Some(r#"["x","y","z"]"#));

        let updated = site.update::<Pillar>(&pillar.id, &seeded).unwrap();
        assert_eq!(updated.activities.items(), ["x", "y", "z"]);
        assert_eq!(site.get::<Pillar>(&pillar.id).unwrap(), pillar);
    }

    #[test]
    fn malformed_list_leaves_stored_record_untouched() {
        let temp = TempDir::new().unwrap();
        let site = service(&temp);
        let pillar = site.create::<Pillar>(&pillar_form("Water")).unwrap();

        let data = pillar_form("Renamed").with("activities_json", "{not valid list}");
        match site.update::<Pillar>(&pillar.id, &data) {
            Err(SiteError::Validation(rejection)) => {
                assert!(rejection.errors.contains("activities_json"));
                assert_eq!(rejection.values.get("title"), Some("Renamed"));
            }
            other => panic!("expected Validation error, got {other:?}"),
        }

        let stored = site.get::<Pillar>(&pillar.id).unwrap();
        assert_eq!(stored, pillar);
        assert_eq!(stored.title.as_str(), "Water");
    }

    #[test]
    fn project_requires_existing_pillar() {
        let temp = TempDir::new().unwrap();
        let site = service(&temp);

        let err = site
            .create::<Project>(&project_form(&RecordId::new(), "active"))
            .expect_err("pillar does not exist");
        match err {
            SiteError::Validation(rejection) => assert!(rejection.errors.contains("pillar")),
            other => panic!("expected Validation error, got {other:?}"),
        }
        assert!(site.list::<Project>().unwrap().is_empty());
    }

    #[test]
    fn deleting_pillar_cascades_to_projects_and_detaches_photos() {
        let temp = TempDir::new().unwrap();
        let site = service(&temp);
        let pillar = site.create::<Pillar>(&pillar_form("Water")).unwrap();
        let project = site
            .create::<Project>(&project_form(&pillar.id, "active"))
            .unwrap();
        let photo = site
            .create::<GalleryPhoto>(
                &FormData::new()
                    .with("title", "Spring")
                    .with("image", "ab".repeat(32))
                    .with("related_pillar", pillar.id.to_string())
                    .with("related_project", project.id.to_string()),
            )
            .unwrap();

        site.delete::<Pillar>(&pillar.id).unwrap();

        assert!(!site.exists::<Project>(&project.id));
        let photo = site.get::<GalleryPhoto>(&photo.id).unwrap();
        assert!(photo.related_pillar.is_none());
        assert!(photo.related_project.is_none());
    }

    #[test]
    fn blog_slug_must_be_unique() {
        let temp = TempDir::new().unwrap();
        let site = service(&temp);
        let form = FormData::new()
            .with("title", "Tree Planting")
            .with("content", "We planted trees.");

        let first = site.create::<BlogPost>(&form).unwrap();
        let err = site.create::<BlogPost>(&form).expect_err("duplicate slug");
        match err {
            SiteError::Validation(rejection) => assert!(rejection.errors.contains("slug")),
            other => panic!("expected Validation error, got {other:?}"),
        }

        // Re-saving the same post keeps its own slug.
        let seeded = site.edit_form::<BlogPost>(&first.id).unwrap();
        site.update::<BlogPost>(&first.id, &seeded).unwrap();
    }

    #[test]
    fn deleting_team_member_clears_blog_author() {
        let temp = TempDir::new().unwrap();
        let site = service(&temp);
        let member = site
            .create::<TeamMember>(
                &FormData::new()
                    .with("name", "Amina")
                    .with("position", "Coordinator"),
            )
            .unwrap();
        let post = site
            .create::<BlogPost>(
                &FormData::new()
                    .with("title", "Field notes")
                    .with("content", "Notes.")
                    .with("author", member.id.to_string()),
            )
            .unwrap();

        site.delete::<TeamMember>(&member.id).unwrap();
        assert!(site.get::<BlogPost>(&post.id).unwrap().author.is_none());
    }

    #[test]
    fn dashboard_stats_count_and_sum() {
        let temp = TempDir::new().unwrap();
        let site = service(&temp);
        let pillar = site.create::<Pillar>(&pillar_form("Water")).unwrap();
        site.create::<Project>(&project_form(&pillar.id, "active"))
            .unwrap();
        site.create::<Project>(&project_form(&pillar.id, "completed"))
            .unwrap();
        site.create::<Project>(&project_form(&pillar.id, "upcoming"))
            .unwrap();
        for amount in ["12.50", "7.55"] {
            site.create::<Donation>(
                &FormData::new()
                    .with("donor_name", "Wanjiru")
                    .with("amount", amount)
                    .with("method", "mpesa"),
            )
            .unwrap();
        }

        let stats = site.dashboard_stats().unwrap();
        assert_eq!(stats.projects_count, 3);
        assert_eq!(stats.active_projects, 1);
        assert_eq!(stats.completed_projects, 1);
        assert_eq!(stats.events_count, 0);
        assert_eq!(stats.total_donations_minor, 2005);
        assert_eq!(stats.total_donations, "20.05");
    }

    #[test]
    fn public_volunteer_submission_is_never_pre_approved() {
        let temp = TempDir::new().unwrap();
        let site = service(&temp);
        let application = site
            .submit_volunteer(
                &FormData::new()
                    .with("name", "Otieno")
                    .with("email", "otieno@example.org")
                    .with("phone", "0700000000")
                    .with("message", "Weekends")
                    .with("approved", "on"),
            )
            .unwrap();
        assert!(!application.approved);
    }

    #[test]
    fn organisation_is_absent_until_saved() {
        let temp = TempDir::new().unwrap();
        let site = service(&temp);
        assert!(site.organisation().unwrap().is_none());
        assert_eq!(
            site.organisation_form().unwrap().get("core_values_json"),
            Some("[]")
        );
    }
}
