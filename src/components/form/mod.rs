use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardHeader, CardTitle, Input, Label,
    Spinner,
};
use leptos::ev;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;
use wasm_bindgen::JsCast;

/// CSS marker shared by every form input; `clear_marked_inputs` resets them
/// wholesale after a submission. Best-effort only, the bound signals stay
/// authoritative.
pub(crate) const INPUT_MARKER_CLASS: &str = "form-field-input";

/// CSS marker of the per-field error element.
pub(crate) const ERROR_MARKER_CLASS: &str = "field-error";

/// Centered single-card page shell shared by the login and registration forms.
#[component]
pub fn FormContainer(#[prop(into)] title: Signal<String>, children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-sm flex-col justify-center px-4 py-10">
                <div class="mb-6 flex items-center justify-center">
                    <a href="/" class="text-sm font-medium text-foreground">"Bookstore"</a>
                </div>

                <Card>
                    <CardHeader>
                        <CardTitle class="text-lg">{move || title.get()}</CardTitle>
                    </CardHeader>
                    <CardContent>{children()}</CardContent>
                </Card>
            </div>
        </div>
    }
}

/// Labeled input with an always-present inline error element. The error text
/// is owned by the parent; an empty element renders when there is none.
#[component]
pub fn FormInput(
    #[prop(into, default = "text")] r#type: &'static str,
    #[prop(into)] title: String,
    #[prop(into, optional)] error: Signal<Option<String>>,
    #[prop(into, optional)] disabled: Signal<bool>,
    #[prop(into)] bind_value: RwSignal<String>,
    #[prop(optional, into)] on_change: Option<Callback<String>>,
) -> impl IntoView {
    let input_id = title.to_lowercase().replace(' ', "-");

    view! {
        <div class="flex flex-col gap-1.5" data-name="FormInput">
            <Label html_for=input_id.clone() class="text-xs">{title}</Label>
            <Input
                id=input_id
                r#type=r#type
                class=format!("{INPUT_MARKER_CLASS} h-8 text-sm")
                disabled=disabled
                bind_value=bind_value
                on_change=on_change
            />
            <p class=format!("{ERROR_MARKER_CLASS} min-h-4 text-xs text-destructive")>
                {move || error.get().unwrap_or_default()}
            </p>
        </div>
    }
}

/// Submit button of a form; the surrounding `<form>` handles the submission.
#[component]
pub fn FormButton(
    #[prop(into)] title: Signal<String>,
    #[prop(into, optional)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <Button class="w-full" size=ButtonSize::Sm attr:disabled=move || disabled.get()>
            {move || title.get()}
        </Button>
    }
}

/// Replaces the submit button while a request is in flight.
#[component]
pub fn FormLoading() -> impl IntoView {
    view! {
        <div class="flex w-full items-center justify-center py-2" data-name="FormLoading">
            <Spinner class="size-5" />
        </div>
    }
}

/// Modal message dialog. Visibility is a parent-owned signal; the dialog
/// closes itself on its Close button and on Escape.
#[component]
pub fn PopUp(
    #[prop(into)] title: String,
    #[prop(into)] content: Signal<String>,
    trigger: RwSignal<bool>,
) -> impl IntoView {
    let handle = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && trigger.get_untracked() {
            trigger.set(false);
        }
    });
    on_cleanup(move || handle.remove());

    view! {
        <Show when=move || trigger.get() fallback=|| ().into_view()>
            <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4">
                <div class="w-full max-w-sm rounded-md border border-border bg-background p-4 shadow-lg">
                    <div class="mb-2 text-sm font-medium">{title.clone()}</div>
                    <p class="text-xs text-muted-foreground">{move || content.get()}</p>
                    <div class="flex items-center justify-end pt-3">
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            on:click=move |_| trigger.set(false)
                        >
                            "Close"
                        </Button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

/// Clears every DOM input carrying the shared marker class. Purely a UI
/// reset; the bound signals are not touched.
pub(crate) fn clear_marked_inputs() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Ok(nodes) = document.query_selector_all(&format!(".{INPUT_MARKER_CLASS}")) else {
        return;
    };
    for i in 0..nodes.length() {
        if let Some(node) = nodes.item(i) {
            if let Some(input) = node.dyn_ref::<web_sys::HtmlInputElement>() {
                input.set_value("");
            }
        }
    }
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use leptos::mount::mount_to;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount_host() -> web_sys::HtmlElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let host = document.create_element("div").unwrap();
        document.body().unwrap().append_child(&host).unwrap();
        host.unchecked_into()
    }

    fn dispatch_input(input: &web_sys::HtmlInputElement, value: &str) {
        input.set_value(value);
        let init = web_sys::EventInit::new();
        init.set_bubbles(true);
        let event = web_sys::Event::new_with_event_init_dict("input", &init).unwrap();
        input.dispatch_event(&event).unwrap();
    }

    #[wasm_bindgen_test]
    fn form_input_renders_title_and_empty_error() {
        let host = mount_host();
        let value = RwSignal::new(String::new());
        let _handle = mount_to(host.clone(), move || {
            view! { <FormInput title="Name" bind_value=value /> }
        });

        let label = host
            .query_selector("label")
            .unwrap()
            .expect("label should render");
        assert_eq!(label.text_content().unwrap_or_default(), "Name");

        let error = host
            .query_selector(&format!(".{ERROR_MARKER_CLASS}"))
            .unwrap()
            .expect("error element should render");
        assert_eq!(error.text_content().unwrap_or_default(), "");

        let input: web_sys::HtmlInputElement = host
            .query_selector("input")
            .unwrap()
            .expect("input should render")
            .unchecked_into();
        assert_eq!(input.type_(), "text");
    }

    #[wasm_bindgen_test]
    fn form_input_shows_error_text_exactly() {
        let host = mount_host();
        let value = RwSignal::new(String::new());
        let error = RwSignal::new(Some("Name is required".to_string()));
        let _handle = mount_to(host.clone(), move || {
            view! { <FormInput title="Name" bind_value=value error=error /> }
        });

        let element = host
            .query_selector(&format!(".{ERROR_MARKER_CLASS}"))
            .unwrap()
            .expect("error element should render");
        assert_eq!(element.text_content().unwrap_or_default(), "Name is required");
    }

    #[wasm_bindgen_test]
    fn form_input_change_callback_gets_raw_value_once() {
        let host = mount_host();
        let value = RwSignal::new(String::new());
        let calls = RwSignal::new(0u32);
        let last = RwSignal::new(String::new());
        let on_change = Callback::new(move |v: String| {
            calls.update(|c| *c += 1);
            last.set(v);
        });

        let _handle = mount_to(host.clone(), move || {
            view! { <FormInput title="Name" bind_value=value on_change=on_change /> }
        });

        let input: web_sys::HtmlInputElement = host
            .query_selector("input")
            .unwrap()
            .expect("input should render")
            .unchecked_into();
        dispatch_input(&input, "test");

        assert_eq!(calls.get_untracked(), 1);
        assert_eq!(last.get_untracked(), "test");
        assert_eq!(value.get_untracked(), "test");
    }

    #[wasm_bindgen_test]
    fn clear_marked_inputs_resets_marked_fields_only() {
        let host = mount_host();
        let marked = RwSignal::new(String::new());
        let _handle = mount_to(host.clone(), move || {
            view! {
                <FormInput title="Name" bind_value=marked />
                <input id="unmarked" value="kept" />
            }
        });

        let input: web_sys::HtmlInputElement = host
            .query_selector(&format!(".{INPUT_MARKER_CLASS}"))
            .unwrap()
            .expect("marked input should render")
            .unchecked_into();
        dispatch_input(&input, "to be cleared");

        clear_marked_inputs();

        assert_eq!(input.value(), "");
        let unmarked: web_sys::HtmlInputElement = host
            .query_selector("#unmarked")
            .unwrap()
            .expect("unmarked input should render")
            .unchecked_into();
        assert_eq!(unmarked.value(), "kept");

        // The bound signal is untouched; the reset is cosmetic.
        assert_eq!(marked.get_untracked(), "to be cleared");
    }
}
