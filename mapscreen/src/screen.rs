use std::sync::Arc;

use crate::config::ScreenConfig;
use crate::error::ScreenError;
use crate::layer_selector::MapLayerSelector;
use crate::map::MapWidget;
use crate::Messenger;
use crate::reveal::{RevealController, RevealOptions, RevealView};
use crate::tile_source::TileSourcePreset;
use crate::ui_queue::{ui_queue, ScreenMessage, UiReceiver};

/// The map screen: a deferred image reveal next to a map with a map type selector.
///
/// All methods must be called from the UI context. Background work only reaches the screen
/// through its message queue, which the UI drains with [`MainScreen::process_messages`].
#[derive(Debug)]
pub struct MainScreen<W: MapWidget> {
    reveal_options: RevealOptions,
    reveal: RevealView,
    controller: RevealController,
    map: W,
    selector: MapLayerSelector,
    receiver: UiReceiver,
    active: bool,
}

impl<W: MapWidget> MainScreen<W> {
    /// Creates the screen: configures the map widget and starts the reveal timer.
    ///
    /// Must be called within a tokio runtime. `messenger`, if given, is notified when a
    /// background message arrives so that an idle UI can wake up and process it.
    pub fn create(
        config: ScreenConfig,
        mut map: W,
        messenger: Option<Arc<dyn Messenger>>,
    ) -> Result<Self, ScreenError> {
        let ScreenConfig {
            reveal: reveal_options,
            map: map_config,
        } = config;

        map_config.apply(&mut map)?;

        let mut selector = MapLayerSelector::default();
        selector.select(map_config.initial_preset(), &mut map)?;

        let (sender, receiver) = ui_queue();
        let sender = match messenger {
            Some(messenger) => sender.with_messenger(messenger),
            None => sender,
        };

        let mut controller = RevealController::new(reveal_options.delay());
        controller.start(sender)?;

        log::info!("Map screen created");

        Ok(Self {
            reveal: RevealView::new(reveal_options.loading_message.clone()),
            reveal_options,
            controller,
            map,
            selector,
            receiver,
            active: true,
        })
    }

    /// Applies the messages posted by background tasks. Returns the number of messages that
    /// changed the screen. Messages arriving after [`MainScreen::destroy`] are discarded.
    pub fn process_messages(&mut self) -> usize {
        let messages = self.receiver.drain();
        if !self.active {
            if !messages.is_empty() {
                log::debug!("Screen is destroyed, dropping {} messages", messages.len());
            }
            return 0;
        }

        let mut applied = 0;
        for message in messages {
            let changed = match message {
                ScreenMessage::RevealElapsed => self.reveal.reveal(
                    &self.reveal_options.success_message,
                    self.reveal_options.image.clone(),
                ),
            };

            if changed {
                applied += 1;
            }
        }

        applied
    }

    /// Handles a choice in the map type dropdown.
    pub fn select_map_type(
        &mut self,
        index: usize,
    ) -> Result<&'static TileSourcePreset, ScreenError> {
        self.selector.select(index, &mut self.map)
    }

    /// Tears the screen down: cancels the pending reveal and stops accepting messages.
    /// Calling it again does nothing.
    pub fn destroy(&mut self) {
        if !self.active {
            return;
        }

        self.active = false;
        if self.controller.cancel() {
            log::info!("Screen destroyed before the image was revealed");
        }
        self.receiver.close();
    }

    /// Whether the screen has not been destroyed.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Presentation of the status label, progress indicator and image.
    pub fn reveal(&self) -> &RevealView {
        &self.reveal
    }

    /// Reveal timer of the screen.
    pub fn reveal_controller(&mut self) -> &mut RevealController {
        &mut self.controller
    }

    /// Map type selector.
    pub fn selector(&self) -> &MapLayerSelector {
        &self.selector
    }

    /// Map widget.
    pub fn map(&self) -> &W {
        &self.map
    }

    /// Mutable access to the map widget, e.g. to forward user input to it.
    pub fn map_mut(&mut self) -> &mut W {
        &mut self.map
    }
}
