//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth signal provided here is the single authoritative token copy
//! for the whole tree; a persisted session is restored into it before the
//! first render so guards see the right state immediately.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::nav_bar::NavBar;
use crate::pages::access::AccessPage;
use crate::pages::add_test::AddTestPage;
use crate::pages::admin::AdminPage;
use crate::pages::login::LoginPage;
use crate::pages::profile::ProfilePage;
use crate::pages::share::SharePage;
use crate::pages::test_detail::TestDetailPage;
use crate::pages::test_list::TestListPage;
use crate::state::auth::{AuthState, restore_session};
use crate::util::guard::NOT_FOUND_TEXT;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the authentication store and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    restore_session(auth);
    provide_context(auth);

    view! {
        <Stylesheet id="leptos" href="/pkg/healthpass.css"/>
        <Title text="HealthPass"/>

        <Router>
            <NavBar/>
            <Routes fallback=|| NOT_FOUND_TEXT.into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=ProfilePage/>
                <Route path=StaticSegment("share") view=SharePage/>
                <Route path=StaticSegment("access") view=AccessPage/>
                <Route path=(StaticSegment("records"), ParamSegment("id")) view=TestListPage/>
                <Route
                    path=(StaticSegment("records"), ParamSegment("id"), StaticSegment("add"))
                    view=AddTestPage
                />
                <Route path=(StaticSegment("tests"), ParamSegment("id")) view=TestDetailPage/>
                <Route path=StaticSegment("admin") view=AdminPage/>
            </Routes>
        </Router>
    }
}
