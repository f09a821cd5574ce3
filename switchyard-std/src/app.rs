//! # Application handle
//!
//! The application object controllers are built from. It bundles the two
//! collaborators controller actions reach for most: a named service
//! [`Container`] and an optional [`ViewRenderer`].
//!
//! ```rust,ignore
//! let app = Application::new()
//!     .with_container(Container::new().with("db", Database::connect()?))
//!     .with_renderer(MyTemplates::load("views/")?);
//!
//! let dispatcher = Dispatcher::<ArticlesController>::new(Arc::new(app))?;
//! ```

use crate::http::Response;
use std::{
    any::{Any, type_name},
    collections::{BTreeMap, HashMap},
    fmt,
    sync::Arc,
};
use switchyard_core::DispatchError;

/// Template variables passed to a [`ViewRenderer`].
pub type ViewVars = BTreeMap<String, String>;

/// Renders a template into a response.
pub trait ViewRenderer: Send + Sync + 'static {
    /// Render `template` with `vars` into `response`, returning the result.
    fn render(
        &self,
        response: Response,
        template: &str,
        vars: &ViewVars,
    ) -> Result<Response, DispatchError>;
}

type Service = Arc<dyn Any + Send + Sync>;

/// Services looked up by name.
#[derive(Clone, Default)]
pub struct Container {
    services: HashMap<String, Service>,
}

impl Container {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `service` under `name`, replacing any previous entry.
    pub fn register<T: Send + Sync + 'static>(&mut self, name: impl Into<String>, service: T) {
        self.services.insert(name.into(), Arc::new(service));
    }

    /// Register a service, builder style.
    pub fn with<T: Send + Sync + 'static>(mut self, name: impl Into<String>, service: T) -> Self {
        self.register(name, service);
        self
    }

    /// Look up the service registered under `name`.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::ServiceNotFound`] if nothing is registered.
    /// - [`DispatchError::ServiceType`] if the service is not a `T`.
    pub fn get<T: Send + Sync + 'static>(&self, name: &str) -> Result<Arc<T>, DispatchError> {
        let service = self
            .services
            .get(name)
            .ok_or_else(|| DispatchError::ServiceNotFound(name.to_owned()))?;

        Arc::clone(service)
            .downcast::<T>()
            .map_err(|_| DispatchError::ServiceType {
                name: name.to_owned(),
                expected: type_name::<T>(),
            })
    }

    /// Whether a service is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    /// Number of registered services.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether the container is empty.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.services.keys().collect();
        names.sort_unstable();
        f.debug_struct("Container").field("services", &names).finish()
    }
}

/// The application handle shared by every controller.
#[derive(Clone, Default)]
pub struct Application {
    container: Container,
    renderer: Option<Arc<dyn ViewRenderer>>,
}

impl Application {
    /// Name the renderer is reported under when missing.
    pub const VIEW: &'static str = "view";

    /// An application with an empty container and no renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `container` for service lookups.
    pub fn with_container(mut self, container: Container) -> Self {
        self.container = container;
        self
    }

    /// Use `renderer` for views.
    pub fn with_renderer(mut self, renderer: impl ViewRenderer) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// The service container.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Shorthand for `container().get(name)`.
    pub fn get<T: Send + Sync + 'static>(&self, name: &str) -> Result<Arc<T>, DispatchError> {
        self.container.get(name)
    }

    /// Render a view into `response`.
    ///
    /// # Errors
    ///
    /// [`DispatchError::ServiceNotFound`] when no renderer is configured,
    /// otherwise whatever the renderer returns.
    pub fn render(
        &self,
        response: Response,
        template: &str,
        vars: &ViewVars,
    ) -> Result<Response, DispatchError> {
        let renderer = self
            .renderer
            .as_ref()
            .ok_or_else(|| DispatchError::ServiceNotFound(Self::VIEW.to_owned()))?;

        #[cfg(feature = "tracing")]
        tracing::trace!(template = %template, "rendering view");

        renderer.render(response, template, vars)
    }
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("container", &self.container)
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}
