use desktop_runtime::{current_viewport, DesktopRuntime, DesktopShell};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Escritorio de widgets" />
        <Meta name="description" content="Virtual desktop with draggable productivity widgets." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=DesktopEntry />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    let services = platform_host_web::build_host_services();
    let runtime = DesktopRuntime::boot(services, current_viewport());

    view! { <DesktopShell runtime=runtime /> }
}
