//! Content webview
//!
//! One child webview pointed at the destination. Its navigation and page-load
//! callbacks are the engine's event stream into the session.

use tauri::ipc::CapabilityBuilder;
use tauri::webview::{NewWindowResponse, PageLoadEvent, WebviewBuilder};
use tauri::{AppHandle, LogicalPosition, LogicalSize, Manager, Webview, WebviewUrl, Window};
use tether_core::{Destination, Shell};

use super::{publish, CONTENT_WEBVIEW_LABEL};
use crate::state::AppState;

/// Reports whether there is history to go back to. Uses the Navigation API
/// where the engine has it; otherwise `history.length` stands in, which never
/// drops back to false once the session has navigated.
const HISTORY_BRIDGE_SCRIPT: &str = r#"
(() => {
  try {
    const canGoBack = () => {
      const nav = window.navigation;
      if (nav && typeof nav.canGoBack === 'boolean') return nav.canGoBack;
      return window.history.length > 1;
    };

    const report = () => {
      try {
        const internals = window.__TAURI_INTERNALS__;
        if (!internals || typeof internals.invoke !== 'function') return;
        internals
          .invoke('history_changed', { canGoBack: canGoBack() })
          .catch(() => {});
      } catch {}
    };

    if (window.navigation && typeof window.navigation.addEventListener === 'function') {
      window.navigation.addEventListener('currententrychange', report);
    } else {
      for (const method of ['pushState', 'replaceState']) {
        const original = window.history[method];
        window.history[method] = function (...args) {
          const result = original.apply(this, args);
          report();
          return result;
        };
      }
      window.addEventListener('popstate', report);
    }

    window.addEventListener('pageshow', report);
  } catch {}
})();
"#;

/// IPC access for the content webview, scoped to the destination origin.
/// Built at runtime because the destination comes from config.
pub fn content_capability(destination: &Destination) -> CapabilityBuilder {
    CapabilityBuilder::new("content-remote")
        .remote(remote_pattern(destination))
        .webview(CONTENT_WEBVIEW_LABEL)
        .permission("core:default")
}

fn remote_pattern(destination: &Destination) -> String {
    format!("{}/*", destination.origin())
}

/// Build the content webview inside `window`, already loading the destination.
pub fn build_content_webview(
    app: &AppHandle,
    window: &Window,
    shell: &Shell,
) -> tauri::Result<Webview> {
    let config = shell.config();
    let webview_url = WebviewUrl::External(shell.destination().url().clone());

    let app_handle_for_navigation = app.clone();
    let app_handle_for_load = app.clone();

    let mut webview_builder = WebviewBuilder::new(CONTENT_WEBVIEW_LABEL, webview_url)
        .auto_resize()
        .incognito(config.storage.incognito)
        .initialization_script(HISTORY_BRIDGE_SCRIPT);

    if let Some(user_agent) = config.webview.user_agent.as_deref() {
        webview_builder = webview_builder.user_agent(user_agent);
    }

    tracing::debug!(
        cache_mode = ?config.webview.cache_mode,
        javascript = config.webview.javascript_enabled,
        "Engine-managed webview settings left at platform defaults"
    );

    let webview_builder = webview_builder
        .on_navigation(move |url| {
            // Engine-internal pages never reach the guard
            if matches!(url.scheme(), "tauri" | "about") {
                return true;
            }

            match app_handle_for_navigation.try_state::<AppState>() {
                Some(state) => state.shell().on_navigation_attempt(url.as_str(), true),
                None => true,
            }
        })
        .on_page_load(move |_webview, payload| {
            let Some(state) = app_handle_for_load.try_state::<AppState>() else {
                return;
            };
            let shell = state.shell();

            match payload.event() {
                PageLoadEvent::Started => {
                    let (started, ticket) = shell.begin_load();
                    publish(&app_handle_for_load, started);

                    let url = payload.url().clone();
                    if !shell.destination().matches_host(&url) {
                        return;
                    }

                    if let Some(prober) = state.prober().cloned() {
                        let app = app_handle_for_load.clone();
                        tauri::async_runtime::spawn(async move {
                            let outcome = prober.probe(url).await;
                            let Some(state) = app.try_state::<AppState>() else {
                                return;
                            };
                            if let Some(next) = outcome.report(state.shell(), ticket) {
                                publish(&app, next);
                            }
                        });
                    }
                }
                PageLoadEvent::Finished => {
                    publish(&app_handle_for_load, shell.on_load_end());
                }
            }
        })
        .on_new_window(|url, _features| {
            // Single-surface shell: popups never open in-app
            tracing::debug!(url = %url, "New window denied");
            NewWindowResponse::Deny
        });

    let size = window.inner_size()?.to_logical::<f64>(window.scale_factor()?);

    match window.add_child(
        webview_builder,
        LogicalPosition::new(0.0, 0.0),
        LogicalSize::new(size.width, size.height),
    ) {
        Ok(webview) => {
            tracing::info!(label = CONTENT_WEBVIEW_LABEL, url = %shell.destination(), "Created content webview");
            Ok(webview)
        }
        Err(e) => {
            tracing::error!(label = CONTENT_WEBVIEW_LABEL, error = %e, "Failed to create content webview");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_pattern_follows_destination() {
        let dest = Destination::parse("https://myprojectplatform.com/app").unwrap();
        assert_eq!(remote_pattern(&dest), "https://myprojectplatform.com/*");

        let dest = Destination::parse("http://staging.example.org:8080/").unwrap();
        assert_eq!(remote_pattern(&dest), "http://staging.example.org:8080/*");
    }

    #[test]
    fn test_history_bridge_prefers_navigation_api() {
        assert!(HISTORY_BRIDGE_SCRIPT.contains("nav.canGoBack"));
        assert!(HISTORY_BRIDGE_SCRIPT.contains("window.history.length > 1"));
        assert!(HISTORY_BRIDGE_SCRIPT.contains("'history_changed'"));
    }
}
