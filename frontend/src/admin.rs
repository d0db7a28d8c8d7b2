use crate::{
	notice::NoticeView,
	style::SharedStyle,
	transport::client
};
use shared_data::{AdminEvent, AdminSession, Category, PillChoice, Registration};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Default, PartialEq)]
struct SessionReducer(AdminSession);

impl Reducible for SessionReducer {
	type Action = AdminEvent;

	fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
		let mut session = self.0.clone();
		session.apply(action);
		Self(session).into()
	}
}

fn registration_view(reg: &Registration) -> Html {
	let (pill_class, pill_mark) = match reg.pill_choice {
		PillChoice::Red => ("pill-red", "R"),
		PillChoice::Blue => ("pill-blue", "B")
	};

	let (status_class, status) = if reg.is_confirmed {
		("confirmed", "Confirmed")
	} else {
		("waiting", "Waiting")
	};

	html! {
		<div class="registration" id={ format!("registration-{}", reg.id) }>
			<span class={ classes!("pill-mark", pill_class) }>{ pill_mark }</span>
			<div class="registration-details">
				<div class="registration-email">{ &reg.email }</div>
				<div class="registration-subtitle">
					{ format!("ID: {} - {}", reg.id, reg.display_time()) }
				</div>
			</div>
			<span class={ classes!("registration-status", status_class) }>{ status }</span>
		</div>
	}
}

#[function_component(Admin)]
pub fn admin() -> Html {
	let session = use_reducer(SessionReducer::default);

	let dismiss = {
		let session = session.clone();
		Callback::from(move |()| session.dispatch(AdminEvent::Dismiss))
	};

	let notice = html! {
		<NoticeView notice={ session.0.notice.clone() } on_dismiss={ dismiss } />
	};

	if !session.0.is_authenticated() {
		let secret_input = {
			let session = session.clone();
			Callback::from(move |e: InputEvent|
				if let Some(input) = e.target()
					.and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) {
						session.dispatch(AdminEvent::Secret(input.value()));
					}
			)
		};

		let login = {
			let session = session.clone();
			Callback::from(move |e: SubmitEvent| {
				e.prevent_default();

				if session.0.is_authenticating() {
					return;
				}

				let (ticket, secret) = match session.0.prepare_login() {
					Ok(prepared) => prepared,
					Err(err) => return session.dispatch(AdminEvent::Invalid(err))
				};

				session.dispatch(AdminEvent::Begin(ticket));

				let session = session.clone();
				wasm_bindgen_futures::spawn_local(async move {
					let res = client().list(&secret).await;
					session.dispatch(AdminEvent::Resolve(ticket, res));
				});
			})
		};

		let checking = session.0.is_authenticating();
		let login_label = if checking { "Checking..." } else { "Log in" };

		return html! {
			<>
				<SharedStyle />
				<style>{ ADMIN_STYLE }</style>
				<main id="admin-gate">
					<h1>{ "Admin" }</h1>
					<p>{ "Enter the secret to continue" }</p>
					<form onsubmit={ login }>
						<input
							type="password"
							placeholder="secret"
							value={ session.0.secret.clone() }
							oninput={ secret_input }
						/>
						<button type="submit" disabled={ checking }>{ login_label }</button>
					</form>
				</main>
				{ notice }
			</>
		};
	}

	let logout = {
		let session = session.clone();
		Callback::from(move |_: MouseEvent| session.dispatch(AdminEvent::Logout))
	};

	let counts = session.0.counts();
	let current = session.0.filter;

	let filter_buttons = Category::ALL.into_iter()
		.map(|category| {
			let session = session.clone();
			let onclick = Callback::from(move |_: MouseEvent| session.dispatch(AdminEvent::Filter(category)));
			let class = classes!(
				"filter",
				match category {
					Category::All => None,
					Category::Red => Some("pill-red"),
					Category::Blue => Some("pill-blue")
				},
				(category == current).then_some("selected")
			);

			html! {
				<button { class } { onclick }>
					{ category.button_label(&counts) }
				</button>
			}
		})
		.collect::<Html>();

	let filtered = session.0.filtered();
	let list_html = if filtered.is_empty() {
		html! { <p id="empty-list">{ "No registrations found" }</p> }
	} else {
		filtered.into_iter().map(registration_view).collect::<Html>()
	};

	html! {
		<>
			<SharedStyle />
			<style>{ ADMIN_STYLE }</style>
			<main id="admin">
				<div id="admin-title">
					<div>
						<h1>{ "Registrations" }</h1>
						<p>{ format!("Total participants: {}", counts.all) }</p>
					</div>
					<button onclick={ logout }>{ "Log out" }</button>
				</div>
				<div id="filters">{ filter_buttons }</div>
				<div id="registrations">{ list_html }</div>
			</main>
			{ notice }
		</>
	}
}

const ADMIN_STYLE: &str = r"
#admin-gate {
	max-width: 360px;
	margin: 20vh auto 0px auto;
	text-align: center;
}
#admin {
	max-width: 900px;
	margin: 20px auto;
}
#admin-title {
	display: flex;
	justify-content: space-between;
	align-items: center;
}
#filters {
	display: flex;
	gap: 8px;
	margin-bottom: 16px;
}
.registration {
	display: flex;
	align-items: center;
	gap: 16px;
	padding: 12px 16px;
	margin-bottom: 8px;
	border-radius: 8px;
	background-color: var(--main-background);
}
.registration-details {
	flex-grow: 1;
}
.registration-subtitle {
	color: var(--secondary-text);
	font-size: small;
}
.pill-mark {
	width: 40px;
	height: 40px;
	line-height: 40px;
	text-align: center;
	border: 1px solid;
	border-radius: 20px;
}
.confirmed {
	color: #3ecf6a;
}
.waiting {
	color: #e6c84a;
}
#empty-list {
	text-align: center;
	color: var(--secondary-text);
}
";
