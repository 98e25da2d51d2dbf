//! The persisted list value and its per-field configuration.

use crate::{decode, encode, normalize, ListFieldResult, ListItem};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// An ordered list owned by a record.
///
/// Persisted as a plain sequence (`#[serde(transparent)]`), so on disk a pillar's activities
/// look like any other YAML list. A `ListField` is never edited in place: a successful form
/// submission builds a new one which replaces the old value wholesale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListField<T> {
    items: Vec<T>,
}

impl<T> Default for ListField<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> ListField<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// The first `n` items (or all of them if there are fewer).
    pub fn first_n(&self, n: usize) -> &[T] {
        &self.items[..self.items.len().min(n)]
    }
}

impl<T: ListItem> ListField<T> {
    /// Encode this list as a transport string for the form field `field`.
    pub fn to_transport(&self, field: &str) -> ListFieldResult<String> {
        encode(field, &self.items)
    }

    /// Decode a transport string without normalising it.
    pub fn from_transport(field: &str, raw: &str) -> ListFieldResult<Self> {
        decode(field, raw).map(Self::new)
    }

    /// Returns this list with blank items removed.
    pub fn normalized(self) -> Self {
        Self::new(normalize(self.items))
    }
}

impl<T> From<Vec<T>> for ListField<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> FromIterator<T> for ListField<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a ListField<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Configuration for one list-valued attribute of a record.
///
/// A record declares one `ListFieldDef` per list attribute, for example:
///
/// ```
/// use list_field::ListFieldDef;
///
/// const ACTIVITIES: ListFieldDef<String> =
///     ListFieldDef::new("activities", "activities_json", "Activities");
///
/// let list = ACTIVITIES.bind(Some(r#"["Tree planting", " "]"#)).unwrap();
/// assert_eq!(list.items(), ["Tree planting".to_string()]);
/// ```
pub struct ListFieldDef<T> {
    name: &'static str,
    transport_name: &'static str,
    label: &'static str,
    _item: PhantomData<fn() -> T>,
}

impl<T> ListFieldDef<T> {
    /// Creates a field definition.
    ///
    /// * `name` - attribute name on the record (`activities`)
    /// * `transport_name` - name of the hidden form input carrying the list (`activities_json`)
    /// * `label` - human-readable label used in error messages
    pub const fn new(
        name: &'static str,
        transport_name: &'static str,
        label: &'static str,
    ) -> Self {
        Self {
            name,
            transport_name,
            label,
            _item: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport_name
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl<T: ListItem> ListFieldDef<T> {
    /// Encode the current value of the attribute to seed an edit form.
    pub fn seed(&self, current: &ListField<T>) -> ListFieldResult<String> {
        current.to_transport(self.transport_name)
    }

    /// Decode and normalise a submitted transport string.
    ///
    /// A missing input (`None`) is treated like an empty string: the list is cleared.
    ///
    /// # Errors
    ///
    /// Returns a [`ListFieldError`](crate::ListFieldError) tagged with
    /// [`transport_name`](Self::transport_name) if the string is malformed.
    pub fn bind(&self, raw: Option<&str>) -> ListFieldResult<ListField<T>> {
        ListField::from_transport(self.transport_name, raw.unwrap_or(""))
            .map(ListField::normalized)
    }
}

impl<T> Clone for ListFieldDef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ListFieldDef<T> {}

impl<T> fmt::Debug for ListFieldDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListFieldDef")
            .field("name", &self.name)
            .field("transport_name", &self.transport_name)
            .field("label", &self.label)
            .finish()
    }
}
