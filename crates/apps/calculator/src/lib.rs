//! Calculator widget: immediate-execution keypad with keyboard input.

mod engine;

use desktop_app_contract::{WidgetModule, WidgetMountContext};
use leptos::ev::KeyboardEvent;
use leptos::*;

pub use engine::{format_number, keyboard_action, CalcAction, CalcError, Calculator, Operator};

#[derive(Clone, Copy)]
struct CalcKeySpec {
    label: &'static str,
    class_name: &'static str,
    action: CalcAction,
}

const fn key(label: &'static str, class_name: &'static str, action: CalcAction) -> CalcKeySpec {
    CalcKeySpec {
        label,
        class_name,
        action,
    }
}

const CALC_KEYS: [CalcKeySpec; 20] = [
    key("C", "function", CalcAction::Clear),
    key("±", "function", CalcAction::ToggleSign),
    key("%", "function", CalcAction::Percent),
    key("÷", "operator", CalcAction::Operator(Operator::Divide)),
    key("7", "digit", CalcAction::Digit(7)),
    key("8", "digit", CalcAction::Digit(8)),
    key("9", "digit", CalcAction::Digit(9)),
    key("×", "operator", CalcAction::Operator(Operator::Multiply)),
    key("4", "digit", CalcAction::Digit(4)),
    key("5", "digit", CalcAction::Digit(5)),
    key("6", "digit", CalcAction::Digit(6)),
    key("−", "operator", CalcAction::Operator(Operator::Subtract)),
    key("1", "digit", CalcAction::Digit(1)),
    key("2", "digit", CalcAction::Digit(2)),
    key("3", "digit", CalcAction::Digit(3)),
    key("+", "operator", CalcAction::Operator(Operator::Add)),
    key("⌫", "function", CalcAction::Backspace),
    key("0", "digit", CalcAction::Digit(0)),
    key(".", "digit", CalcAction::Decimal),
    key("=", "equals", CalcAction::Equals),
];

#[component]
pub fn CalculatorWidget() -> impl IntoView {
    let calc = create_rw_signal(Calculator::default());

    let on_keydown = move |ev: KeyboardEvent| {
        if ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
            return;
        }
        if let Some(action) = keyboard_action(&ev.key()) {
            ev.prevent_default();
            calc.update(|state| state.apply(action));
        }
    };

    view! {
        <div class="widget calculator" tabindex="0" on:keydown=on_keydown>
            <div class="calc-display-panel">
                <div class="calc-expression" aria-live="off">
                    {move || calc.with(Calculator::expression)}
                </div>
                <div
                    class="calc-display"
                    class:error=move || calc.with(|state| state.error().is_some())
                    role="status"
                    aria-live="polite"
                >
                    {move || calc.with(Calculator::display)}
                </div>
            </div>
            <div class="calc-keypad" role="group" aria-label="Teclado">
                {CALC_KEYS
                    .iter()
                    .map(|key| {
                        let action = key.action;
                        view! {
                            <button
                                type="button"
                                class=format!("calc-key {}", key.class_name)
                                on:click=move |_| calc.update(|state| state.apply(action))
                            >
                                {key.label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

fn mount(_context: WidgetMountContext) -> View {
    view! { <CalculatorWidget /> }.into_view()
}

pub fn widget_module() -> WidgetModule {
    WidgetModule::new(mount)
}
