//! Read the rendered page into a [`PageSnapshot`].

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlDetailsElement, HtmlInputElement};

use crate::accordion::{TopicElement, UnitElement};
use crate::config::UiConfig;
use crate::cooldown::CooldownElements;
use crate::page::PageSnapshot;
use crate::toggle::{ToggleWidget, WidgetKind};

/// Elements found during discovery that listeners attach to.
pub struct Discovered {
    pub snapshot: PageSnapshot,
    pub accordions: Vec<HtmlDetailsElement>,
    pub checkboxes: Vec<HtmlInputElement>,
    pub scroll_container: Option<Element>,
    pub cooldown_form: Option<Element>,
    pub code_form: Option<Element>,
}

/// Every element under `root` matching `selector`.
pub fn select_all(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        log::debug!("invalid selector `{selector}`");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Give `el` an id if it has none, so patches can address it.
fn ensure_id(el: &Element, fallback: &str) -> String {
    let id = el.id();
    if !id.is_empty() {
        return id;
    }
    el.set_id(fallback);
    fallback.to_owned()
}

fn details_with_prefix(root: &Element, prefix: &str) -> Vec<HtmlDetailsElement> {
    select_all(root, &format!("details[id^='{prefix}']"))
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlDetailsElement>().ok())
        .collect()
}

fn checkbox_group(root: &Element, selector: &str, tag: &str) -> (Vec<ToggleWidget>, Vec<HtmlInputElement>) {
    let inputs: Vec<HtmlInputElement> = select_all(root, selector)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlInputElement>().ok())
        .collect();
    let widgets = inputs
        .iter()
        .enumerate()
        .map(|(i, input)| {
            let id = ensure_id(input, &format!("course-ui-{tag}-{i}"));
            ToggleWidget::new(id, WidgetKind::Checkbox, input.checked())
        })
        .collect();
    (widgets, inputs)
}

pub fn discover(document: &Document, root: &Element, config: &UiConfig) -> Discovered {
    let unit_details = details_with_prefix(root, &config.unit_id_prefix);
    let topic_details = details_with_prefix(root, &config.topic_id_prefix);
    let unit_selector = format!("details[id^='{}']", config.unit_id_prefix);

    let units = unit_details.iter().map(|d| UnitElement { id: d.id() }).collect();
    let topics = topic_details
        .iter()
        .map(|d| {
            let parent_unit_id = d
                .parent_element()
                .and_then(|p| p.closest(&unit_selector).ok().flatten())
                .map(|u| u.id())
                .unwrap_or_default();
            TopicElement { id: d.id(), parent_unit_id }
        })
        .collect();

    let (unit_toggles, mut checkboxes) = checkbox_group(root, &config.unit_toggle_selector, "unit-toggle");
    let (topic_toggles, topic_inputs) = checkbox_group(root, &config.topic_toggle_selector, "topic-toggle");
    checkboxes.extend(topic_inputs);

    let scroll_container = root.query_selector(&config.scroll_container_selector).ok().flatten();

    let button = document.get_element_by_id(&config.cooldown_button_id);
    let message = document.get_element_by_id(&config.cooldown_message_id);
    let cooldown_form = button.as_ref().and_then(|b| b.closest("form").ok().flatten());
    let cooldown = match (&button, &message, &cooldown_form) {
        (Some(_), Some(_), Some(form)) => Some(CooldownElements {
            button_id: config.cooldown_button_id.clone(),
            message_id: config.cooldown_message_id.clone(),
            form_id: ensure_id(form, "course-ui-cooldown-form"),
        }),
        _ => None,
    };

    let code_form = document
        .get_element_by_id(&config.editor_mount_id)
        .and_then(|_| root.query_selector(&config.editor_form_selector).ok().flatten());
    let code_form_id = code_form.as_ref().map(|f| ensure_id(f, "course-ui-code-form"));
    let code_input_id = document
        .get_element_by_id(&config.editor_input_id)
        .map(|_| config.editor_input_id.clone());

    let mut accordions = unit_details;
    accordions.extend(topic_details);

    Discovered {
        snapshot: PageSnapshot {
            units,
            topics,
            unit_toggles,
            topic_toggles,
            has_scroll_container: scroll_container.is_some(),
            cooldown,
            code_form_id,
            code_input_id,
        },
        accordions,
        checkboxes,
        scroll_container,
        cooldown_form,
        code_form,
    }
}
