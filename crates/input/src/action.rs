use flycube_camera::CameraMovement;
use flycube_common::KeyBindingSettings;
use std::collections::HashMap;

/// A key-driven action. The host maps physical keys to these, never to camera calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move while the key is held.
    Move(CameraMovement),
    /// Request the application to exit.
    Quit,
    /// Show or hide the stats overlay.
    ToggleOverlay,
}

/// Lookup from key name to [`Action`], built from the configured bindings.
#[derive(Debug, Clone, Default)]
pub struct ActionMap {
    key_to_action: HashMap<String, Action>,
}

impl ActionMap {
    pub fn from_settings(bindings: &KeyBindingSettings) -> Self {
        let pairs = [
            (&bindings.forward, Action::Move(CameraMovement::Forward)),
            (&bindings.backward, Action::Move(CameraMovement::Backward)),
            (&bindings.left, Action::Move(CameraMovement::Left)),
            (&bindings.right, Action::Move(CameraMovement::Right)),
            (&bindings.quit, Action::Quit),
            (&bindings.toggle_overlay, Action::ToggleOverlay),
        ];

        let mut key_to_action = HashMap::new();
        for (key, action) in pairs {
            if let Some(previous) = key_to_action.insert(key.clone(), action) {
                tracing::warn!("key {key} bound to both {previous:?} and {action:?}; using {action:?}");
            }
        }
        Self { key_to_action }
    }

    pub fn lookup(&self, key: &str) -> Option<Action> {
        self.key_to_action.get(key).copied()
    }
}

/// Movement directions whose keys are currently held down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldMovement {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
}

impl HeldMovement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, direction: CameraMovement, held: bool) {
        match direction {
            CameraMovement::Forward => self.forward = held,
            CameraMovement::Backward => self.backward = held,
            CameraMovement::Left => self.left = held,
            CameraMovement::Right => self.right = held,
        }
    }

    pub fn press(&mut self, direction: CameraMovement) {
        self.set(direction, true);
    }

    pub fn release(&mut self, direction: CameraMovement) {
        self.set(direction, false);
    }

    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    pub fn is_held(&self, direction: CameraMovement) -> bool {
        match direction {
            CameraMovement::Forward => self.forward,
            CameraMovement::Backward => self.backward,
            CameraMovement::Left => self.left,
            CameraMovement::Right => self.right,
        }
    }

    /// Held directions in application order: forward, left, backward, right.
    pub fn iter(&self) -> impl Iterator<Item = CameraMovement> + '_ {
        CameraMovement::ALL
            .into_iter()
            .filter(move |direction| self.is_held(*direction))
    }
}

impl FromIterator<CameraMovement> for HeldMovement {
    fn from_iter<I: IntoIterator<Item = CameraMovement>>(directions: I) -> Self {
        let mut held = Self::new();
        for direction in directions {
            held.press(direction);
        }
        held
    }
}

impl<const N: usize> From<[CameraMovement; N]> for HeldMovement {
    fn from(directions: [CameraMovement; N]) -> Self {
        directions.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_resolve() {
        let map = ActionMap::from_settings(&KeyBindingSettings::default());
        assert_eq!(
            map.lookup("KeyW"),
            Some(Action::Move(CameraMovement::Forward))
        );
        assert_eq!(
            map.lookup("KeyS"),
            Some(Action::Move(CameraMovement::Backward))
        );
        assert_eq!(map.lookup("KeyA"), Some(Action::Move(CameraMovement::Left)));
        assert_eq!(map.lookup("KeyD"), Some(Action::Move(CameraMovement::Right)));
        assert_eq!(map.lookup("Escape"), Some(Action::Quit));
        assert_eq!(map.lookup("F1"), Some(Action::ToggleOverlay));
        assert_eq!(map.lookup("KeyQ"), None);
    }

    #[test]
    fn rebound_keys_resolve() {
        let bindings = KeyBindingSettings {
            forward: "ArrowUp".into(),
            ..KeyBindingSettings::default()
        };
        let map = ActionMap::from_settings(&bindings);
        assert_eq!(
            map.lookup("ArrowUp"),
            Some(Action::Move(CameraMovement::Forward))
        );
        assert_eq!(map.lookup("KeyW"), None);
    }

    #[test]
    fn held_iteration_order_is_fixed() {
        let held = HeldMovement::from([
            CameraMovement::Right,
            CameraMovement::Backward,
            CameraMovement::Forward,
            CameraMovement::Left,
        ]);
        let order: Vec<_> = held.iter().collect();
        assert_eq!(order, CameraMovement::ALL.to_vec());
    }

    #[test]
    fn press_release() {
        let mut held = HeldMovement::new();
        assert_eq!(held.iter().count(), 0);
        held.press(CameraMovement::Left);
        held.press(CameraMovement::Forward);
        assert!(held.is_held(CameraMovement::Left));
        held.release(CameraMovement::Left);
        assert_eq!(held.iter().collect::<Vec<_>>(), vec![CameraMovement::Forward]);
        held.release_all();
        assert_eq!(held, HeldMovement::default());
    }
}
