use cgmath::Vector2;
use winit::event::TouchPhase;

use super::InputEvent;

/// Tracks active touch contacts
///
/// Winit reports each finger separately; the interaction state machine wants
/// the full contact list with every touch event. Contacts keep the order in
/// which their fingers went down.
#[derive(Debug, Default)]
pub struct TouchTracker {
    contacts: Vec<(u64, Vector2<f32>)>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Forgets every contact. Used when the window loses focus, since lifts
    /// that happen elsewhere are never reported.
    pub fn clear(&mut self) {
        self.contacts.clear();
    }

    /// Records one finger update. Returns `None` for fingers that were never
    /// seen going down.
    pub fn update(&mut self, id: u64, phase: TouchPhase, position: Vector2<f32>) -> Option<InputEvent> {
        let index = self.contacts.iter().position(|(contact, _)| *contact == id);
        match phase {
            TouchPhase::Started => {
                match index {
                    Some(i) => self.contacts[i].1 = position,
                    None => self.contacts.push((id, position)),
                }
                Some(InputEvent::TouchStart {
                    touches: self.positions(),
                })
            }
            TouchPhase::Moved => {
                self.contacts[index?].1 = position;
                Some(InputEvent::TouchMove {
                    touches: self.positions(),
                })
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.contacts.remove(index?);
                Some(InputEvent::TouchEnd {
                    touches: self.positions(),
                })
            }
        }
    }

    fn positions(&self) -> Vec<Vector2<f32>> {
        self.contacts.iter().map(|(_, position)| *position).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contacts_accumulate_in_order() {
        let mut tracker = TouchTracker::new();
        tracker.update(7, TouchPhase::Started, Vector2::new(10.0, 10.0));
        let event = tracker.update(3, TouchPhase::Started, Vector2::new(50.0, 10.0));
        assert_eq!(
            event,
            Some(InputEvent::TouchStart {
                touches: vec![Vector2::new(10.0, 10.0), Vector2::new(50.0, 10.0)]
            })
        );

        let event = tracker.update(7, TouchPhase::Moved, Vector2::new(12.0, 10.0));
        assert_eq!(
            event,
            Some(InputEvent::TouchMove {
                touches: vec![Vector2::new(12.0, 10.0), Vector2::new(50.0, 10.0)]
            })
        );
    }

    #[test]
    fn test_lift_reports_remaining_contacts() {
        let mut tracker = TouchTracker::new();
        tracker.update(1, TouchPhase::Started, Vector2::new(0.0, 0.0));
        tracker.update(2, TouchPhase::Started, Vector2::new(5.0, 5.0));
        let event = tracker.update(1, TouchPhase::Cancelled, Vector2::new(0.0, 0.0));
        assert_eq!(
            event,
            Some(InputEvent::TouchEnd {
                touches: vec![Vector2::new(5.0, 5.0)]
            })
        );
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_clear_drops_stale_contacts() {
        let mut tracker = TouchTracker::new();
        tracker.update(1, TouchPhase::Started, Vector2::new(0.0, 0.0));
        tracker.clear();
        assert!(tracker.is_empty());

        // A new finger starts a fresh one-contact gesture
        let event = tracker.update(2, TouchPhase::Started, Vector2::new(4.0, 4.0));
        assert_eq!(
            event,
            Some(InputEvent::TouchStart {
                touches: vec![Vector2::new(4.0, 4.0)]
            })
        );
        // The forgotten finger's late lift is ignored
        assert_eq!(tracker.update(1, TouchPhase::Ended, Vector2::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_unknown_finger_is_ignored() {
        let mut tracker = TouchTracker::new();
        assert_eq!(tracker.update(9, TouchPhase::Moved, Vector2::new(1.0, 1.0)), None);
        assert_eq!(tracker.update(9, TouchPhase::Ended, Vector2::new(1.0, 1.0)), None);
        assert!(tracker.is_empty());
    }
}
