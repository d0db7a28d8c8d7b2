use gloo_timers::callback::Timeout;
use shared_data::{Notice, NoticeKind};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct NoticeProps {
	pub notice: Option<Notice>,
	pub on_dismiss: Callback<()>
}

#[function_component(NoticeView)]
pub fn notice_view(props: &NoticeProps) -> Html {
	{
		let on_dismiss = props.on_dismiss.clone();
		// Re-armed every time the notice changes; dropping the `Timeout` cancels it
		use_effect_with(props.notice.clone(), move |notice| {
			let timeout = notice.as_ref().map(|notice| {
				let millis = u32::try_from(notice.display_for().as_millis()).unwrap_or(u32::MAX);
				Timeout::new(millis, move || on_dismiss.emit(()))
			});

			move || drop(timeout)
		});
	}

	let Some(notice) = &props.notice else {
		return html! {};
	};

	let class = match notice.kind {
		NoticeKind::Success => classes!("notice"),
		NoticeKind::Error => classes!("notice", "error")
	};

	let dismiss = props.on_dismiss.reform(|_: MouseEvent| ());

	html! {
		<div { class } role="status" onclick={ dismiss }>
			<strong>{ &notice.title }</strong>
			{
				notice.description.as_ref()
					.map(|desc| html! { <p>{ desc }</p> })
					.unwrap_or_default()
			}
		</div>
	}
}
