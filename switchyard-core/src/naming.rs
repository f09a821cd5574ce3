//! Controller name derivation.
//!
//! Controllers are recorded under a short name derived from their type:
//! `app::controller::admin::ArticlesController` becomes `articles`. The
//! derivation is a pure string transform.

use crate::{controller::Controller, error::DispatchError};

const SUFFIX: &str = "controller";

/// Derive a controller's short name from its fully-qualified type name.
///
/// The name is lowercased, split on any namespace separator (`::`, `.` or
/// `\`), and the trailing `controller` suffix is stripped from the last
/// segment. Generic arguments are ignored.
///
/// # Errors
///
/// Returns [`DispatchError::NamingConventionViolation`] when the last segment
/// doesn't end with the suffix, or consists of nothing but the suffix.
///
/// # Example
///
/// ```rust
/// use switchyard_core::derive_controller_name;
///
/// let name = derive_controller_name("App.Controller.Admin.ArticlesController").unwrap();
/// assert_eq!(name, "articles");
/// ```
pub fn derive_controller_name(type_name: &str) -> Result<String, DispatchError> {
    let path = type_name.split('<').next().unwrap_or(type_name);
    let lowered = path.trim().to_lowercase();
    let simple = lowered
        .rsplit([':', '.', '\\'])
        .next()
        .unwrap_or(lowered.as_str());

    match simple.strip_suffix(SUFFIX) {
        Some(name) if !name.is_empty() => Ok(name.to_owned()),
        _ => Err(DispatchError::NamingConventionViolation {
            type_name: type_name.to_owned(),
        }),
    }
}

/// The names a controller is recorded under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerIdentity {
    short_name: String,
    type_name: &'static str,
}

impl ControllerIdentity {
    /// Compute the identity of controller type `C`.
    pub fn of<C: Controller>() -> Result<Self, DispatchError> {
        let type_name = C::type_name();
        Ok(Self {
            short_name: derive_controller_name(type_name)?,
            type_name,
        })
    }

    /// The lowercased name without the `controller` suffix.
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// The fully-qualified type name.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}
