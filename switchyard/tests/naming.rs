//! Controller naming convention.

use std::sync::Arc;
use switchyard::testing::StatelessController;
use switchyard::{ActionTable, Controller, DispatchError, Dispatcher, derive_controller_name};

#[test]
fn test_dotted_type_names() {
    assert_eq!(
        derive_controller_name("App.Controller.Admin.ArticlesController").unwrap(),
        "articles"
    );
    assert_eq!(
        derive_controller_name("App.Controller.HomeController").unwrap(),
        "home"
    );
}

#[test]
fn test_missing_suffix_is_a_violation() {
    for name in ["App.Controller.Articles", "Controller", "app::ArticlesService", ""] {
        let err = derive_controller_name(name).unwrap_err();
        assert!(
            matches!(err, DispatchError::NamingConventionViolation { ref type_name } if type_name == name),
            "{name:?} -> {err:?}"
        );
    }
}

/// Reports a type name in another namespace style.
struct AdminController;

impl Controller for AdminController {
    type App = ();
    type Request = ();
    type Response = ();
    type Output = ();

    fn create(_app: &Arc<()>) -> Self {
        AdminController
    }

    fn type_name() -> &'static str {
        "App.Controller.Admin.UsersController"
    }
}

/// Does not follow the convention.
struct Widgets;

impl Controller for Widgets {
    type App = ();
    type Request = ();
    type Response = ();
    type Output = ();

    fn create(_app: &Arc<()>) -> Self {
        Widgets
    }
}

#[test]
fn test_identity_uses_reported_type_name() {
    let dispatcher =
        Dispatcher::with_table(Arc::new(()), ActionTable::<AdminController>::builder().build().unwrap())
            .unwrap();

    assert_eq!(dispatcher.identity().short_name(), "users");
    assert_eq!(
        dispatcher.identity().type_name(),
        "App.Controller.Admin.UsersController"
    );
}

#[test]
fn test_violation_fails_at_registration() {
    let result =
        Dispatcher::with_table(Arc::new(()), ActionTable::<Widgets>::builder().build().unwrap());
    assert!(matches!(
        result,
        Err(DispatchError::NamingConventionViolation { .. })
    ));
}

#[test]
fn test_generic_arguments_are_ignored() {
    assert_eq!(
        derive_controller_name("app::PostsController<app::Db>").unwrap(),
        "posts"
    );
    let dispatcher = Dispatcher::with_table(
        Arc::new(()),
        ActionTable::<StatelessController>::builder().build().unwrap(),
    )
    .unwrap();
    assert_eq!(dispatcher.identity().short_name(), "stateless");
}
