//! Identity and audit base model.

use serde::{Deserialize, Serialize};

use docrepo_core::traits::Document;

/// Identity and audit fields shared by stored entities.
///
/// Embed it with `#[serde(flatten)]` and call [`impl_document!`](crate::impl_document)
/// to make the enclosing type a [`Document`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DmlModel {
    /// External string identifier; empty until created.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_on: String,
    /// Creating actor.
    #[serde(default)]
    pub created_by: String,
    /// Last modification timestamp.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub modified_on: String,
    /// Last modifying actor.
    #[serde(default)]
    pub modified_by: String,
}

impl DmlModel {
    /// A base carrying only an identifier, for building update requests.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

impl Document for DmlModel {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn set_created_by(&mut self, by: &str) {
        self.created_by = by.to_string();
    }

    fn set_created_on(&mut self, on: &str) {
        self.created_on = on.to_string();
    }

    fn set_modified_by(&mut self, by: &str) {
        self.modified_by = by.to_string();
    }

    fn set_modified_on(&mut self, on: &str) {
        self.modified_on = on.to_string();
    }
}

/// Implement [`Document`] for an entity by delegating to an embedded
/// [`DmlModel`] field.
///
/// ```ignore
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Customer {
///     #[serde(flatten)]
///     base: DmlModel,
///     name: String,
/// }
///
/// impl_document!(Customer, base);
/// ```
#[macro_export]
macro_rules! impl_document {
    ($entity:ty, $base:ident) => {
        impl $crate::Document for $entity {
            fn id(&self) -> &str {
                &self.$base.id
            }

            fn set_id(&mut self, id: String) {
                self.$base.id = id;
            }

            fn set_created_by(&mut self, by: &str) {
                self.$base.created_by = by.to_string();
            }

            fn set_created_on(&mut self, on: &str) {
                self.$base.created_on = on.to_string();
            }

            fn set_modified_by(&mut self, by: &str) {
                self.$base.modified_by = by.to_string();
            }

            fn set_modified_on(&mut self, on: &str) {
                self.$base.modified_on = on.to_string();
            }
        }
    };
}
