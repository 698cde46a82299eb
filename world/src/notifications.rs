//! Fire-and-forget announcements and the board that displays them.

use std::{collections::VecDeque, time::Duration};

use storm_castle_core::Notification;

/// Ordered queue of announcements awaiting the presentation layer.
#[derive(Debug, Default)]
pub(crate) struct NotificationChannel {
    pending: VecDeque<Notification>,
}

impl NotificationChannel {
    pub(crate) fn post(&mut self, notification: Notification) {
        log::info!("{}", notification.message);
        self.pending.push_back(notification);
    }

    pub(crate) fn drain(&mut self) -> Vec<Notification> {
        self.pending.drain(..).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn clear(&mut self) {
        self.pending.clear();
    }
}

/// Notification currently shown on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardEntry {
    notification: Notification,
    slot: usize,
    age: Duration,
}

impl BoardEntry {
    /// Announcement being displayed.
    #[must_use]
    pub const fn notification(&self) -> &Notification {
        &self.notification
    }

    /// Display row occupied by the entry, counted from the top.
    #[must_use]
    pub const fn slot(&self) -> usize {
        self.slot
    }

    /// Time the entry has been visible.
    #[must_use]
    pub const fn age(&self) -> Duration {
        self.age
    }
}

/// Shows drained notifications for a fixed lifetime each.
///
/// Entries never displace one another: a new entry takes the lowest free
/// slot and every entry expires on its own clock.
#[derive(Clone, Debug)]
pub struct NotificationBoard {
    lifetime: Duration,
    entries: Vec<BoardEntry>,
}

impl NotificationBoard {
    /// Creates an empty board whose entries live for `lifetime`.
    #[must_use]
    pub const fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            entries: Vec::new(),
        }
    }

    /// Displays the notification in the lowest free slot.
    pub fn show(&mut self, notification: Notification) {
        let slot = (0..)
            .find(|candidate| self.entries.iter().all(|entry| entry.slot != *candidate))
            .unwrap_or(self.entries.len());
        self.entries.push(BoardEntry {
            notification,
            slot,
            age: Duration::ZERO,
        });
        self.entries.sort_by_key(|entry| entry.slot);
    }

    /// Ages every entry by `dt` and removes the ones whose lifetime elapsed.
    pub fn tick(&mut self, dt: Duration) {
        let lifetime = self.lifetime;
        for entry in &mut self.entries {
            entry.age = entry.age.saturating_add(dt);
        }
        self.entries.retain(|entry| entry.age < lifetime);
    }

    /// Entries currently visible, ordered by slot.
    #[must_use]
    pub fn visible(&self) -> &[BoardEntry] {
        &self.entries
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storm_castle_core::{NotificationKind, UnitKind};

    fn joined(kind: UnitKind) -> Notification {
        Notification::new(NotificationKind::UnitJoined(kind))
    }

    #[test]
    fn channel_drains_in_posting_order() {
        let mut channel = NotificationChannel::default();
        channel.post(Notification::new(NotificationKind::EnemiesStrengthened));
        channel.post(joined(UnitKind::Mage));
        assert_eq!(channel.len(), 2);

        let drained = channel.drain();
        assert_eq!(drained[0].kind, NotificationKind::EnemiesStrengthened);
        assert_eq!(drained[1].kind, NotificationKind::UnitJoined(UnitKind::Mage));
        assert_eq!(channel.len(), 0);
    }

    #[test]
    fn entries_expire_independently() {
        let mut board = NotificationBoard::new(Duration::from_millis(3_000));
        board.show(joined(UnitKind::Warrior));
        board.tick(Duration::from_millis(2_000));
        board.show(joined(UnitKind::Ranger));

        board.tick(Duration::from_millis(999));
        assert_eq!(board.visible().len(), 2);

        board.tick(Duration::from_millis(1));
        let visible = board.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].notification(), &joined(UnitKind::Ranger));
        assert_eq!(visible[0].slot(), 1);

        board.tick(Duration::from_millis(2_000));
        assert!(board.visible().is_empty());
    }

    #[test]
    fn new_entries_fill_lowest_free_slot() {
        let mut board = NotificationBoard::new(Duration::from_millis(3_000));
        board.show(joined(UnitKind::Warrior));
        board.tick(Duration::from_millis(1_000));
        board.show(joined(UnitKind::Ranger));
        board.tick(Duration::from_millis(2_000));
        board.show(joined(UnitKind::Mage));

        let slots: Vec<usize> = board.visible().iter().map(BoardEntry::slot).collect();
        assert_eq!(slots, vec![0, 1]);
        assert_eq!(board.visible()[0].notification(), &joined(UnitKind::Mage));
    }
}
