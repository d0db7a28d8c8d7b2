use yew_router::prelude::*;
use yew::prelude::*;
use landing::Landing;
use admin::Admin;

mod admin;
mod landing;
mod notice;
mod style;
mod transport;

#[derive(Clone, Routable, PartialEq)]
enum Route {
	#[not_found]
	#[at("/")]
	Landing,
	#[at("/admin")]
	Admin
}

fn switch(route: Route) -> Html {
	match route {
		Route::Landing => html! { <Landing /> },
		Route::Admin => html! { <Admin /> }
	}
}

#[function_component(Frontend)]
pub fn frontend() -> Html {
	html! {
		<BrowserRouter>
			<Switch<Route> render={switch} />
		</BrowserRouter>
	}
}

fn main() {
	console_error_panic_hook::set_once();
	tracing_wasm::set_as_global_default();

	tracing::info!("Starting frontend");
	yew::Renderer::<Frontend>::new().render();
}
