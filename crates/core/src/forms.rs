//! Form submissions and field binding.
//!
//! A dashboard or public form arrives as a flat map of field name to string. [`FormBinder`]
//! walks the fields an entity needs, converts each into its typed value and accumulates
//! per-field messages instead of stopping at the first failure. When any field fails, the
//! caller gets a [`FormRejection`] carrying every message plus the submitted values, so the
//! form can be shown again with the user's entries intact.
//!
//! List-valued attributes travel in a hidden input named `<field>_json`; see
//! [`FormBinder::list_field`].

use crate::config::ListLimits;
use becc_types::{EmailAddress, MediaRef, NonEmptyText, TextError, WebUrl};
use becc_uuid::RecordId;
use chrono::NaiveDate;
use list_field::{ListField, ListFieldDef, ListItem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// A submitted form: field name to raw string value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, String>> for FormData {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

/// Messages per field name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn merge(&mut self, other: FormErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    /// Comma-separated field names.
    pub fn summary(&self) -> String {
        self.fields().collect::<Vec<_>>().join(", ")
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

/// A submission that failed validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("submission rejected: invalid fields {}", .errors.summary())]
pub struct FormRejection {
    pub errors: FormErrors,
    /// The submitted values, echoed back for re-rendering.
    pub values: FormData,
}

impl FormRejection {
    pub fn new(errors: FormErrors, values: FormData) -> Self {
        Self { errors, values }
    }
}

/// A closed set of stored values with display labels.
pub trait Choice: Sized + Copy + 'static {
    const ALL: &'static [Self];

    /// Stored value, e.g. `completed`.
    fn value(self) -> &'static str;

    /// Display label, e.g. `Completed`.
    fn label(self) -> &'static str;

    fn from_value(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.value() == value)
    }
}

/// Validates one submission field by field.
///
/// Every method reads one field, records messages for it on failure and returns the typed
/// value (or `None`/a default). Constructors then check [`is_clean`](Self::is_clean) once all
/// fields have been read.
pub struct FormBinder<'a> {
    data: &'a FormData,
    limits: ListLimits,
    errors: FormErrors,
}

impl<'a> FormBinder<'a> {
    pub fn new(data: &'a FormData, limits: ListLimits) -> Self {
        Self {
            data,
            limits,
            errors: FormErrors::default(),
        }
    }

    fn raw(&self, name: &str) -> &'a str {
        self.data.get(name).map(str::trim).unwrap_or("")
    }

    fn text_error(&mut self, name: &str, err: TextError) {
        let message = match err {
            TextError::Empty => REQUIRED_MESSAGE.to_string(),
            other => format!("{other}."),
        };
        self.errors.add(name, message);
    }

    pub fn required_text(&mut self, name: &str, max_chars: usize) -> Option<NonEmptyText> {
        match NonEmptyText::with_max_chars(self.raw(name), max_chars) {
            Ok(text) => Some(text),
            Err(e) => {
                self.text_error(name, e);
                None
            }
        }
    }

    /// Blank input yields an empty string.
    pub fn optional_text(&mut self, name: &str, max_chars: usize) -> String {
        let raw = self.raw(name);
        if raw.is_empty() {
            return String::new();
        }
        match NonEmptyText::with_max_chars(raw, max_chars) {
            Ok(text) => text.as_str().to_owned(),
            Err(e) => {
                self.text_error(name, e);
                String::new()
            }
        }
    }

    pub fn email(&mut self, name: &str) -> Option<EmailAddress> {
        match EmailAddress::parse(self.raw(name)) {
            Ok(email) => Some(email),
            Err(e) => {
                self.text_error(name, e);
                None
            }
        }
    }

    pub fn optional_email(&mut self, name: &str) -> Option<EmailAddress> {
        if self.raw(name).is_empty() {
            return None;
        }
        self.email(name)
    }

    pub fn optional_url(&mut self, name: &str) -> Option<WebUrl> {
        let raw = self.raw(name);
        if raw.is_empty() {
            return None;
        }
        match WebUrl::parse(raw) {
            Ok(url) => Some(url),
            Err(e) => {
                self.text_error(name, e);
                None
            }
        }
    }

    /// Dates are submitted as `YYYY-MM-DD`.
    pub fn date(&mut self, name: &str) -> Option<NaiveDate> {
        let raw = self.raw(name);
        if raw.is_empty() {
            self.errors.add(name, REQUIRED_MESSAGE);
            return None;
        }
        self.parse_date(name, raw)
    }

    pub fn optional_date(&mut self, name: &str) -> Option<NaiveDate> {
        let raw = self.raw(name);
        if raw.is_empty() {
            return None;
        }
        self.parse_date(name, raw)
    }

    fn parse_date(&mut self, name: &str, raw: &str) -> Option<NaiveDate> {
        match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                self.errors.add(name, "Enter a valid date.");
                None
            }
        }
    }

    pub fn choice<C: Choice>(&mut self, name: &str) -> Option<C> {
        let raw = self.raw(name);
        if raw.is_empty() {
            self.errors.add(name, REQUIRED_MESSAGE);
            return None;
        }
        let choice = C::from_value(raw);
        if choice.is_none() {
            self.errors.add(
                name,
                format!("Select a valid choice. {raw} is not one of the available choices."),
            );
        }
        choice
    }

    /// HTML checkboxes submit `on` when ticked and nothing otherwise.
    pub fn checkbox(&mut self, name: &str) -> bool {
        matches!(
            self.raw(name).to_ascii_lowercase().as_str(),
            "on" | "true" | "1" | "yes"
        )
    }

    /// A positive amount with at most two decimal places, returned in minor units.
    pub fn money(&mut self, name: &str) -> Option<i64> {
        let raw = self.raw(name);
        if raw.is_empty() {
            self.errors.add(name, REQUIRED_MESSAGE);
            return None;
        }
        match parse_minor_units(raw) {
            Some(amount) if amount > 0 => Some(amount),
            Some(_) => {
                self.errors
                    .add(name, "Ensure this value is greater than zero.");
                None
            }
            None => {
                self.errors.add(
                    name,
                    "Enter a number with at most two decimal places.",
                );
                None
            }
        }
    }

    /// A required id of another record. Existence is checked by the service.
    pub fn reference(&mut self, name: &str) -> Option<RecordId> {
        if self.raw(name).is_empty() {
            self.errors.add(name, REQUIRED_MESSAGE);
            return None;
        }
        self.optional_reference(name)
    }

    pub fn optional_reference(&mut self, name: &str) -> Option<RecordId> {
        let raw = self.raw(name);
        if raw.is_empty() {
            return None;
        }
        match RecordId::parse(raw) {
            Ok(id) => Some(id),
            Err(_) => {
                self.errors.add(name, "Select a valid choice.");
                None
            }
        }
    }

    pub fn media(&mut self, name: &str) -> Option<MediaRef> {
        if self.raw(name).is_empty() {
            self.errors.add(name, REQUIRED_MESSAGE);
            return None;
        }
        self.optional_media(name)
    }

    pub fn optional_media(&mut self, name: &str) -> Option<MediaRef> {
        let raw = self.raw(name);
        if raw.is_empty() {
            return None;
        }
        match MediaRef::parse(raw) {
            Ok(media) => Some(media),
            Err(_) => {
                self.errors.add(name, "Upload a valid image.");
                None
            }
        }
    }

    /// Read, decode and normalise the list carried in `def`'s transport input.
    ///
    /// A missing input is an empty list. Decode failures and limit violations are recorded
    /// under the transport name (`activities_json`), never replaced by an empty list.
    pub fn list_field<T: ListItem>(&mut self, def: &ListFieldDef<T>) -> Option<ListField<T>> {
        let name = def.transport_name();
        let list = match def.bind(self.data.get(name)) {
            Ok(list) => list,
            Err(e) => {
                self.errors.add(name, format!("{}: {e}", def.label()));
                return None;
            }
        };

        let mut ok = true;
        if list.len() > self.limits.max_items {
            self.errors.add(
                name,
                format!(
                    "{}: ensure this list has at most {} items (it has {}).",
                    def.label(),
                    self.limits.max_items,
                    list.len()
                ),
            );
            ok = false;
        }
        for (index, item) in list.iter().enumerate() {
            if item.max_text_chars() > self.limits.max_item_chars {
                self.errors.add(
                    name,
                    format!(
                        "{}: item {} has more than {} characters.",
                        def.label(),
                        index + 1,
                        self.limits.max_item_chars
                    ),
                );
                ok = false;
            }
        }

        ok.then_some(list)
    }

    /// Record a message produced by a cross-field rule.
    pub fn add_error(&mut self, name: &str, message: impl Into<String>) {
        self.errors.add(name, message);
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_rejection(self) -> FormRejection {
        FormRejection::new(self.errors, self.data.clone())
    }
}

/// Parse `12`, `12.5` or `12.50` into minor units (`1250`).
pub fn parse_minor_units(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (whole, frac) = match raw.split_once('.') {
        Some((w, f)) => (w, f),
        None => (raw, ""),
    };
    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let whole: i64 = whole.parse().ok()?;
    let cents: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().ok()? * 10,
        _ => frac.parse().ok()?,
    };
    whole.checked_mul(100)?.checked_add(cents)
}

/// Format minor units as `12.50`.
pub fn format_minor_units(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Colour {
        Green,
        Sky,
    }

    impl Choice for Colour {
        const ALL: &'static [Self] = &[Colour::Green, Colour::Sky];

        fn value(self) -> &'static str {
            match self {
                Colour::Green => "green",
                Colour::Sky => "sky",
            }
        }

        fn label(self) -> &'static str {
            match self {
                Colour::Green => "Green",
                Colour::Sky => "Sky blue",
            }
        }
    }

    const ACTIVITIES: ListFieldDef<String> =
        ListFieldDef::new("activities", "activities_json", "Activities");

    fn binder(data: &FormData) -> FormBinder<'_> {
        FormBinder::new(data, ListLimits::default())
    }

    #[test]
    fn required_text_trims_and_reports_missing() {
        let data = FormData::new().with("title", "  Water  ");
        let mut form = binder(&data);

        assert_eq!(form.required_text("title", 255).unwrap().as_str(), "Water");
        assert!(form.required_text("description", 255).is_none());

        let rejection = form.into_rejection();
        assert_eq!(
            rejection.errors.get("description"),
            Some(&[REQUIRED_MESSAGE.to_string()][..])
        );
        assert!(!rejection.errors.contains("title"));
    }

    #[test]
    fn errors_accumulate_across_fields() {
        let data = FormData::new()
            .with("email", "not-an-email")
            .with("date", "31/12/2024")
            .with("amount", "12.505");
        let mut form = binder(&data);

        form.email("email");
        form.date("date");
        form.money("amount");
        form.required_text("name", 100);

        let rejection = form.into_rejection();
        let fields: Vec<_> = rejection.errors.fields().collect();
        assert_eq!(fields, ["amount", "date", "email", "name"]);
        assert_eq!(rejection.values, data);
    }

    #[test]
    fn optional_fields_accept_blank() {
        let data = FormData::new().with("website", "  ");
        let mut form = binder(&data);

        assert_eq!(form.optional_text("bio", 100), "");
        assert!(form.optional_url("website").is_none());
        assert!(form.optional_email("contact_email").is_none());
        assert!(form.optional_date("end_date").is_none());
        assert!(form.optional_reference("author").is_none());
        assert!(form.optional_media("image").is_none());
        assert!(form.is_clean());
    }

    #[test]
    fn choice_accepts_only_known_values() {
        let data = FormData::new().with("a", "sky").with("b", "purple");
        let mut form = binder(&data);

        assert_eq!(form.choice::<Colour>("a"), Some(Colour::Sky));
        assert_eq!(Colour::Sky.label(), "Sky blue");
        assert!(form.choice::<Colour>("b").is_none());
        assert!(form.choice::<Colour>("c").is_none());

        let errors = form.into_rejection().errors;
        assert!(errors.get("b").unwrap()[0].contains("purple"));
        assert_eq!(errors.get("c").unwrap()[0], REQUIRED_MESSAGE);
    }

    #[test]
    fn checkbox_reads_browser_values() {
        let data = FormData::new().with("a", "on").with("b", "false");
        let mut form = binder(&data);
        assert!(form.checkbox("a"));
        assert!(!form.checkbox("b"));
        assert!(!form.checkbox("missing"));
    }

    #[test]
    fn money_parses_minor_units() {
        assert_eq!(parse_minor_units("12.50"), Some(1250));
        assert_eq!(parse_minor_units("12.5"), Some(1250));
        assert_eq!(parse_minor_units("12"), Some(1200));
        assert_eq!(parse_minor_units("0.07"), Some(7));
        assert_eq!(parse_minor_units("12.505"), None);
        assert_eq!(parse_minor_units("-3"), None);
        assert_eq!(parse_minor_units(".5"), None);
        assert_eq!(parse_minor_units("1e3"), None);
        assert_eq!(format_minor_units(1250), "12.50");
        assert_eq!(format_minor_units(7), "0.07");
    }

    #[test]
    fn money_rejects_zero() {
        let data = FormData::new().with("amount", "0.00");
        let mut form = binder(&data);
        assert!(form.money("amount").is_none());
        assert!(!form.is_clean());
    }

    #[test]
    fn list_field_decodes_and_normalizes() {
        let data = FormData::new().with(
            "activities_json",
            r#"["Tree planting","","  ","Waste management"]"#,
        );
        let mut form = binder(&data);

        let list = form.list_field(&ACTIVITIES).unwrap();
        assert_eq!(list.items(), ["Tree planting", "Waste management"]);
        assert!(form.is_clean());
    }

    #[test]
    fn list_field_missing_input_is_empty_list() {
        let data = FormData::new();
        let mut form = binder(&data);
        assert!(form.list_field(&ACTIVITIES).unwrap().is_empty());
    }

    #[test]
    fn list_field_malformed_input_is_field_error_under_transport_name() {
        let data = FormData::new()
            .with("title", "Water")
            .with("activities_json", "{not valid list}");
        let mut form = binder(&data);

        let title = form.required_text("title", 255);
        assert!(form.list_field(&ACTIVITIES).is_none());
        assert!(title.is_some());

        let rejection = form.into_rejection();
        let messages = rejection.errors.get("activities_json").unwrap();
        assert!(messages[0].starts_with("Activities: Enter a valid list"));
        assert_eq!(rejection.values.get("title"), Some("Water"));
        assert_eq!(
            rejection.values.get("activities_json"),
            Some("{not valid list}")
        );
    }

    #[test]
    fn list_field_enforces_limits() {
        let data = FormData::new().with("activities_json", r#"["a","b","c","dddddd"]"#);
        let mut form = FormBinder::new(&data, ListLimits::new(3, 5).unwrap());

        assert!(form.list_field(&ACTIVITIES).is_none());
        let errors = form.into_rejection().errors;
        let messages = errors.get("activities_json").unwrap();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("at most 3 items (it has 4)"));
        assert!(messages[1].contains("item 4 has more than 5 characters"));
    }

    #[test]
    fn rejection_serializes_as_field_map() {
        let mut errors = FormErrors::default();
        errors.add("title", REQUIRED_MESSAGE);
        let rejection = FormRejection::new(errors, FormData::new().with("title", ""));

        let json = serde_json::to_value(&rejection).unwrap();
        assert_eq!(json["errors"]["title"][0], REQUIRED_MESSAGE);
        assert_eq!(json["values"]["title"], "");
        assert!(rejection.to_string().contains("title"));
    }
}
