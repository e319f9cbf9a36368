// Copyright 2026 the Holobiont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rhizome theme switch.

use alloc::boxed::Box;
use alloc::rc::Rc;

use holobiont_core::theme::{ACTIVE_CLASS, CONTAINER_SELECTOR, Theme};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event};

use crate::Page;

struct ThemeUi {
    container: Element,
    buttons: [(Theme, Element); 2],
}

impl ThemeUi {
    /// Renders every class from `theme`.
    fn render(&self, theme: Theme) {
        for (class, present) in theme.container_classes() {
            let _ = self.container.class_list().toggle_with_force(class, present);
        }
        for (button_theme, button) in &self.buttons {
            let _ = button
                .class_list()
                .toggle_with_force(ACTIVE_CLASS, theme.is_active(*button_theme));
        }
    }
}

/// Binds the two theme buttons to the rhizome container.
///
/// Does nothing unless the container and both buttons exist.
pub(crate) fn setup(page: &Page) -> Result<(), JsValue> {
    let Some(container) = page.document.query_selector(CONTAINER_SELECTOR)? else {
        return Ok(());
    };
    let [Some(bio), Some(techno)] = Theme::ALL.map(|t| page.document.get_element_by_id(t.button_id()))
    else {
        return Ok(());
    };

    let ui = Rc::new(ThemeUi {
        container,
        buttons: [(Theme::Bio, bio), (Theme::Techno, techno)],
    });

    for (theme, button) in &ui.buttons {
        let theme = *theme;
        let ui_cb = Rc::clone(&ui);
        let on_click = Closure::wrap(Box::new(move |_event: Event| {
            ui_cb.render(theme);
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

    wasm_bindgen_test_configure!(run_in_browser);

    fn element() -> Element {
        web_sys::window()
            .and_then(|w| w.document())
            .expect("browser document")
            .create_element("div")
            .expect("create element")
    }

    #[wasm_bindgen_test]
    fn render_follows_the_clicked_theme() {
        let ui = ThemeUi {
            container: element(),
            buttons: [(Theme::Bio, element()), (Theme::Techno, element())],
        };
        for theme in [Theme::Techno, Theme::Bio, Theme::Bio] {
            ui.render(theme);
            for candidate in Theme::ALL {
                assert_eq!(
                    ui.container.class_list().contains(candidate.container_class()),
                    candidate == theme,
                    "container carries only the selected theme class"
                );
            }
            for (button_theme, button) in &ui.buttons {
                assert_eq!(
                    button.class_list().contains(ACTIVE_CLASS),
                    *button_theme == theme,
                    "only the selected theme's button is active"
                );
            }
        }
    }
}
