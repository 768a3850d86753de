//! Asset collaborator contract
//!
//! Visuals are produced by an external, slow provider. The state machine never
//! waits on it: requests are spawned on tokio, responses come back through a
//! channel, and the [`AssetBoard`] serves placeholders until they arrive.
//! Responses for a role that is no longer active are dropped.

use crate::runtime::debug;
use crate::types::{Catalog, Role, SessionState};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// What the provider needs to know about the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetKey {
    pub role: Role,
    pub stage: u32,
}

impl SessionState {
    /// Asset key for the current role and stage, `None` before role selection
    pub fn asset_key(&self) -> Option<AssetKey> {
        self.role.map(|role| AssetKey {
            role,
            stage: self.stage,
        })
    }
}

/// A visual the presentation layer can show
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetSlot {
    PlayerSprite,
    MapBackground,
    /// Sprite for the ally with this id
    AllySprite(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    pub key: AssetKey,
    pub slot: AssetSlot,
    /// Free-form description handed to the provider
    pub prompt: String,
}

/// Opaque handle to a generated visual
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetHandle(pub String);

impl AssetHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("Asset provider unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("No asset for {slot:?}")]
    NotFound { slot: AssetSlot },
}

/// A finished request, successful or not
#[derive(Debug, Clone)]
pub struct AssetResponse {
    pub request: AssetRequest,
    pub result: Result<AssetHandle, AssetError>,
}

/// Source of generated visuals
#[async_trait]
pub trait AssetProvider: Send + Sync {
    async fn generate(&self, request: AssetRequest) -> Result<AssetHandle, AssetError>;
}

/// Offline provider that answers with the glyphs already in the catalog
#[derive(Debug, Clone)]
pub struct GlyphAssetProvider {
    ally_icons: HashMap<String, String>,
}

impl GlyphAssetProvider {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let ally_icons = catalog
            .stages
            .iter()
            .flat_map(|stage| stage.events.iter())
            .flat_map(|(_, events)| events.iter())
            .filter(|event| !event.ally.icon.is_empty())
            .map(|event| (event.ally.id.clone(), event.ally.icon.clone()))
            .collect();
        Self { ally_icons }
    }

    fn role_glyph(role: Role) -> &'static str {
        match role {
            Role::Communicator => "📜",
            Role::TechLeader => "🛡️",
            Role::ControlTower => "🏰",
            Role::Mage => "🔮",
            Role::Reporter => "⏱️",
        }
    }
}

#[async_trait]
impl AssetProvider for GlyphAssetProvider {
    async fn generate(&self, request: AssetRequest) -> Result<AssetHandle, AssetError> {
        let glyph = match &request.slot {
            AssetSlot::PlayerSprite => Self::role_glyph(request.key.role).to_string(),
            AssetSlot::MapBackground => "🌳".to_string(),
            AssetSlot::AllySprite(id) => self
                .ally_icons
                .get(id)
                .cloned()
                .ok_or_else(|| AssetError::NotFound {
                    slot: request.slot.clone(),
                })?,
        };
        Ok(AssetHandle(glyph))
    }
}

/// Run each request on the tokio runtime and post the result to `responses`
///
/// Must be called from within a runtime. A closed channel just drops the
/// response.
pub fn spawn_requests(
    provider: Arc<dyn AssetProvider>,
    requests: Vec<AssetRequest>,
    responses: mpsc::UnboundedSender<AssetResponse>,
) {
    for request in requests {
        let provider = Arc::clone(&provider);
        let responses = responses.clone();
        tokio::spawn(async move {
            let result = provider.generate(request.clone()).await;
            let _ = responses.send(AssetResponse { request, result });
        });
    }
}

/// Assets currently on display, keyed by slot
#[derive(Debug, Clone)]
pub struct AssetBoard {
    key: Option<AssetKey>,
    handles: HashMap<AssetSlot, AssetHandle>,
    placeholder: String,
}

impl Default for AssetBoard {
    fn default() -> Self {
        Self::new("?")
    }
}

impl AssetBoard {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            key: None,
            handles: HashMap::new(),
            placeholder: placeholder.into(),
        }
    }

    pub fn key(&self) -> Option<AssetKey> {
        self.key
    }

    /// Follow the session and list the requests to issue for what changed
    ///
    /// A role change drops every held handle. A stage change within the same
    /// role only asks for the new stage's allies.
    pub fn sync(&mut self, state: &SessionState, catalog: &Catalog) -> Vec<AssetRequest> {
        let next = state.asset_key();
        if next == self.key {
            return Vec::new();
        }
        let previous = std::mem::replace(&mut self.key, next);

        let Some(key) = next else {
            self.handles.clear();
            return Vec::new();
        };

        let mut requests = Vec::new();
        if previous.map(|p| p.role) != Some(key.role) {
            self.handles.clear();
            let info = catalog.role_info(key.role);
            requests.push(AssetRequest {
                key,
                slot: AssetSlot::PlayerSprite,
                prompt: format!(
                    "pixel art hero sprite, {} ({}) holding {}",
                    info.name, info.title, info.base_item.name
                ),
            });
            requests.push(AssetRequest {
                key,
                slot: AssetSlot::MapBackground,
                prompt: "top-down pixel art village map background".to_string(),
            });
        }

        for event in catalog.events(key.stage, key.role) {
            let slot = AssetSlot::AllySprite(event.ally.id.clone());
            if self.handles.contains_key(&slot) || requests.iter().any(|r| r.slot == slot) {
                continue;
            }
            requests.push(AssetRequest {
                key,
                slot,
                prompt: format!("pixel art sprite of {}, {}", event.ally.name, event.ally.role),
            });
        }

        log::debug!(
            target: debug::ASSETS,
            "[Assets] {:?} -> {} request(s)",
            key,
            requests.len()
        );
        requests
    }

    /// Store a finished response
    ///
    /// Returns `false` when the response was dropped: it was generated for a
    /// role that is no longer active, or the provider failed.
    pub fn accept(&mut self, response: AssetResponse) -> bool {
        let current_role = self.key.map(|k| k.role);
        if current_role != Some(response.request.key.role) {
            log::debug!(
                target: debug::ASSETS,
                "[Assets] discarding stale {:?} for {}",
                response.request.slot,
                response.request.key.role
            );
            return false;
        }

        match response.result {
            Ok(handle) => {
                self.handles.insert(response.request.slot, handle);
                true
            }
            Err(error) => {
                log::warn!(target: debug::ASSETS, "[Assets] {}", error);
                false
            }
        }
    }

    /// Handle for a slot, or the placeholder while it is missing
    pub fn get(&self, slot: &AssetSlot) -> &str {
        self.handles
            .get(slot)
            .map(AssetHandle::as_str)
            .unwrap_or(self.placeholder.as_str())
    }

    pub fn is_ready(&self, slot: &AssetSlot) -> bool {
        self.handles.contains_key(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::rules::RulesConfig;

    fn playing(role: Role, stage: u32) -> SessionState {
        let mut state = SessionState::new(&RulesConfig::default(), "start");
        state.role = Some(role);
        state.stage = stage;
        state
    }

    struct FailingProvider;

    #[async_trait]
    impl AssetProvider for FailingProvider {
        async fn generate(&self, _request: AssetRequest) -> Result<AssetHandle, AssetError> {
            Err(AssetError::Unavailable {
                reason: "offline".to_string(),
            })
        }
    }

    #[test]
    fn sync_requests_role_assets_once() {
        let catalog = catalog::builtin().expect("builtin");
        let mut board = AssetBoard::default();

        let requests = board.sync(&playing(Role::Mage, 1), &catalog);
        let slots: Vec<_> = requests.iter().map(|r| r.slot.clone()).collect();
        assert_eq!(
            slots,
            vec![
                AssetSlot::PlayerSprite,
                AssetSlot::MapBackground,
                AssetSlot::AllySprite("cx".to_string())
            ]
        );

        assert!(board.sync(&playing(Role::Mage, 1), &catalog).is_empty());

        let requests = board.sync(&playing(Role::Mage, 2), &catalog);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].slot, AssetSlot::AllySprite("sage".to_string()));
    }

    #[tokio::test]
    async fn glyph_provider_answers_from_catalog() {
        let catalog = catalog::builtin().expect("builtin");
        let provider = GlyphAssetProvider::from_catalog(&catalog);
        let mut board = AssetBoard::default();

        for request in board.sync(&playing(Role::Reporter, 1), &catalog) {
            let result = provider.generate(request.clone()).await;
            assert!(board.accept(AssetResponse { request, result }));
        }
        assert_eq!(board.get(&AssetSlot::PlayerSprite), "⏱️");
        assert!(board.is_ready(&AssetSlot::AllySprite("cx".to_string())));
    }

    #[tokio::test]
    async fn stale_role_responses_are_discarded() {
        let catalog = catalog::builtin().expect("builtin");
        let provider = GlyphAssetProvider::from_catalog(&catalog);
        let mut board = AssetBoard::default();

        let requests = board.sync(&playing(Role::Mage, 1), &catalog);
        // The player restarts and picks another role before anything resolves
        board.sync(&playing(Role::Reporter, 1), &catalog);

        for request in requests {
            let result = provider.generate(request.clone()).await;
            assert!(!board.accept(AssetResponse { request, result }));
        }
        assert_eq!(board.get(&AssetSlot::PlayerSprite), "?");
    }

    #[tokio::test]
    async fn failures_fall_back_to_placeholder() {
        let catalog = catalog::builtin().expect("builtin");
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut board = AssetBoard::new("..");

        let requests = board.sync(&playing(Role::Mage, 1), &catalog);
        let count = requests.len();
        spawn_requests(Arc::new(FailingProvider), requests, tx);

        for _ in 0..count {
            let response = rx.recv().await.expect("response");
            assert!(!board.accept(response));
        }
        assert_eq!(board.get(&AssetSlot::MapBackground), "..");
    }

    #[tokio::test]
    async fn spawned_requests_deliver_through_channel() {
        let catalog = catalog::builtin().expect("builtin");
        let provider: Arc<dyn AssetProvider> = Arc::new(GlyphAssetProvider::from_catalog(&catalog));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut board = AssetBoard::default();

        let requests = board.sync(&playing(Role::TechLeader, 1), &catalog);
        let count = requests.len();
        spawn_requests(provider, requests, tx);

        for _ in 0..count {
            let response = rx.recv().await.expect("response");
            assert!(board.accept(response));
        }
        assert_eq!(board.get(&AssetSlot::PlayerSprite), "🛡️");
    }
}
