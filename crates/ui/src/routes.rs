use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};
use quiz_core::model::{QuizMode, StartFrom};

use crate::views::{HomeView, QuizView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/quiz/:mode/:start", QuizView)] Quiz { mode: QuizMode, start: StartFrom },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "topbar",
                Link { to: Route::Home {}, class: "brand", "Quiz" }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
