use crate::{
	notice::NoticeView,
	style::SharedStyle,
	transport::client
};
use shared_data::{FormEvent, PillChoice, RegistrationForm, StatsCounter, StatsEvent, Ticket};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Default, PartialEq)]
struct FormReducer(RegistrationForm);

impl Reducible for FormReducer {
	type Action = FormEvent;

	fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
		let mut form = self.0.clone();
		form.apply(action);
		Self(form).into()
	}
}

#[derive(Default, PartialEq)]
struct StatsReducer(StatsCounter);

impl Reducible for StatsReducer {
	type Action = StatsEvent;

	fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
		let mut counter = self.0.clone();
		counter.apply(action);
		Self(counter).into()
	}
}

// The ticket lives outside the reducer since this gets called from inside futures that only hold
// an old snapshot of it
fn refresh_stats(stats: UseReducerHandle<StatsReducer>, tickets: Rc<RefCell<Ticket>>) {
	let ticket = {
		let mut last = tickets.borrow_mut();
		*last = last.wrapping_add(1);
		*last
	};

	stats.dispatch(StatsEvent::Begin(ticket));

	wasm_bindgen_futures::spawn_local(async move {
		let res = client().stats().await;
		stats.dispatch(StatsEvent::Resolve(ticket, res));
	});
}

#[function_component(Landing)]
pub fn landing() -> Html {
	let form = use_reducer(FormReducer::default);
	let stats = use_reducer(StatsReducer::default);
	let stats_tickets = use_mut_ref(Ticket::default);

	{
		let stats = stats.clone();
		let stats_tickets = stats_tickets.clone();
		use_effect_with((), move |_| {
			refresh_stats(stats, stats_tickets);
			|| ()
		});
	}

	let choose = |choice: PillChoice| {
		let form = form.clone();
		Callback::from(move |_: MouseEvent| form.dispatch(FormEvent::Choose(choice)))
	};

	let email_input = {
		let form = form.clone();
		Callback::from(move |e: InputEvent|
			if let Some(input) = e.target()
				.and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) {
					form.dispatch(FormEvent::Email(input.value()));
				}
		)
	};

	let submit = {
		let form = form.clone();
		let stats = stats.clone();
		let stats_tickets = stats_tickets.clone();
		Callback::from(move |e: SubmitEvent| {
			e.prevent_default();

			// The button is disabled while we wait, but enter-to-submit doesn't care about that
			if form.0.is_pending() {
				return;
			}

			let (ticket, req) = match form.0.prepare() {
				Ok(prepared) => prepared,
				Err(err) => return form.dispatch(FormEvent::Invalid(err))
			};

			form.dispatch(FormEvent::Begin(ticket));

			let form = form.clone();
			let stats = stats.clone();
			let stats_tickets = stats_tickets.clone();
			wasm_bindgen_futures::spawn_local(async move {
				let res = client().submit(&req).await;
				let succeeded = res.is_ok();

				form.dispatch(FormEvent::Resolve(ticket, res));

				if succeeded {
					refresh_stats(stats, stats_tickets);
				}
			});
		})
	};

	let dismiss = {
		let form = form.clone();
		Callback::from(move |()| form.dispatch(FormEvent::Dismiss))
	};

	let pill_class = |choice: PillChoice| classes!(
		"pill",
		format!("pill-{choice}"),
		(form.0.choice == Some(choice)).then_some("selected")
	);

	let pending = form.0.is_pending();
	let submit_label = if pending { "Sending..." } else { "Wake up" };

	html! {
		<>
			<SharedStyle />
			<style>{ LANDING_STYLE }</style>
			<main id="landing">
				<h1>{ "Are you still in the Matrix?" }</h1>
				<p>
					{ "March 15 and 16 are Digital Awakening Day." }
					<br />
					{ "Time to find out who's running your reality." }
				</p>
				{
					stats.0.stats()
						.map(|s| html! { <p id="counter">{ format!("{} already chose", s.total) }</p> })
						.unwrap_or_default()
				}
				<form id="registration" onsubmit={ submit }>
					<div id="pills">
						<button type="button" class={ pill_class(PillChoice::Red) } onclick={ choose(PillChoice::Red) }>
							{ "TRUTH" }
						</button>
						<button type="button" class={ pill_class(PillChoice::Blue) } onclick={ choose(PillChoice::Blue) }>
							{ "SLEEP" }
						</button>
					</div>
					<input
						type="email"
						placeholder="your@email.com"
						value={ form.0.email.clone() }
						oninput={ email_input }
					/>
					<button type="submit" disabled={ pending }>
						{ submit_label }
					</button>
				</form>
			</main>
			<NoticeView notice={ form.0.notice.clone() } on_dismiss={ dismiss } />
		</>
	}
}

const LANDING_STYLE: &str = r"
#landing {
	max-width: 640px;
	margin: 10vh auto 0px auto;
	text-align: center;
}
#counter {
	color: var(--secondary-text);
}
#pills {
	display: flex;
	justify-content: center;
	gap: 24px;
	margin: 24px 0px;
}
.pill {
	width: 120px;
	height: 56px;
	border-radius: 28px;
	font-weight: bold;
}
#registration input {
	width: 60%;
	margin-right: 8px;
}
";
