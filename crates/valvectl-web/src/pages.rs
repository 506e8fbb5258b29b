//! Page assembly.
//!
//! Composes the core templates into complete response bodies. All
//! substitution values come from the configuration store at render time, so
//! every request reflects the current valve table.

use valvectl_core::templates::{COLOR_TOKEN, HOST_TOKEN, SLOT_TOKEN, STATUS_TOKEN, TEXT_TOKEN};
use valvectl_core::{ConfigStore, Renderer, TemplateId, ValveEntry};

/// The control page: header with script/style includes for the configured
/// host, one tile per valve slot, footer.
pub fn control_page(store: &ConfigStore, renderer: &Renderer) -> String {
    let mut page = renderer.render(
        TemplateId::PageStart,
        &[(HOST_TOKEN, store.credentials().host.as_str())],
    );
    for (index, entry) in store.valves().iter().enumerate() {
        page.push_str(&valve_tile(index, entry, store, renderer));
    }
    page.push_str(&renderer.render(TemplateId::PageEnd, &[]));
    page
}

/// One valve tile. The caption format ("label: STATE") matches what the page
/// script writes back into the text node after a toggle.
fn valve_tile(
    index: usize,
    entry: &ValveEntry,
    store: &ConfigStore,
    renderer: &Renderer,
) -> String {
    let state = entry.state();
    let slot = index.to_string();
    let caption = format!("{}: {}", entry.label, state);
    renderer.render(
        TemplateId::ValveFragment,
        &[
            (SLOT_TOKEN, slot.as_str()),
            (STATUS_TOKEN, state.as_str()),
            (COLOR_TOKEN, store.colors().for_state(state)),
            (TEXT_TOKEN, caption.as_str()),
        ],
    )
}

/// The WiFi setup page: script-free header plus the credentials form.
pub fn setup_page(renderer: &Renderer) -> String {
    let mut page = renderer.render(TemplateId::PageStartNoScript, &[]);
    page.push_str(&renderer.render(TemplateId::WifiSetupForm, &[]));
    page.push_str(&renderer.render(TemplateId::PageEnd, &[]));
    page
}

/// Confirmation page answered by `configuration.save`.
pub fn saved_page(renderer: &Renderer) -> String {
    let mut page = renderer.render(TemplateId::PageStartNoScript, &[]);
    page.push_str("<div>Configuration saved</div>");
    page.push_str(&renderer.render(TemplateId::PageEnd, &[]));
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use valvectl_core::WifiCredentials;

    fn test_store() -> ConfigStore {
        let credentials = WifiCredentials::new("HomeNet", "hunter22", "192.168.1.50").unwrap();
        ConfigStore::factory(credentials)
    }

    #[test]
    fn test_control_page_substitutes_host() {
        let page = control_page(&test_store(), &Renderer::new());
        assert!(page.contains("http://192.168.1.50/valves/script.js"));
        assert!(page.contains("http://192.168.1.50/valves/style.css"));
        assert!(!page.contains("HOST_$"));
    }

    #[test]
    fn test_control_page_renders_every_slot() {
        let page = control_page(&test_store(), &Renderer::new());
        for index in 0..8 {
            assert!(page.contains(&format!("id='valve_{index}'")));
        }
        assert!(page.contains("Garden Lights: OFF"));
        assert!(page.contains("fill='#FF0000'"));
        // Unassigned slots render offline
        assert!(page.contains("status='OFFLINE'"));
        assert!(page.contains("fill='gray'"));
    }

    #[test]
    fn test_control_page_tracks_status() {
        let mut store = test_store();
        store.set_valve_status(0, true).unwrap();

        let page = control_page(&store, &Renderer::new());
        assert!(page.contains("Garden Lights: ON"));
        assert!(page.contains("fill='#00D800'"));
    }

    #[test]
    fn test_setup_page_has_form_and_no_scripts() {
        let page = setup_page(&Renderer::new());
        assert!(page.contains(r#"action="configuration.save""#));
        assert!(!page.contains("<script"));
    }
}
