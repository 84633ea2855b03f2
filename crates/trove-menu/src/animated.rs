//! Animated menus: a fixed number of redraw frames cycled by an external
//! timer.
//!
//! The engine does not own a clock. A [`FramePlayer`] is ticked once per
//! [`interval`](FramePlayer::interval) by whatever timer the host has, and
//! reports when that timer should stop.

use std::sync::Arc;
use std::time::Duration;

use trove_core::ViewerId;

use crate::error::MenuError;
use crate::menu::{Menu, MenuBuilder};

/// A set of frames built from one menu shape.
#[derive(Debug)]
pub struct AnimatedMenu {
    builder: MenuBuilder,
    frames: Vec<Arc<Menu>>,
    capacity: usize,
    interval: Duration,
    looping: bool,
}

impl AnimatedMenu {
    /// Room for `capacity` frames, each shown for `interval`. Frames built
    /// by this set always redraw in place.
    pub fn new(builder: MenuBuilder, capacity: usize, interval: Duration) -> Self {
        Self {
            builder: builder.redraw(true),
            frames: Vec::with_capacity(capacity),
            capacity,
            interval,
            looping: false,
        }
    }

    /// Start over after the last frame (builder).
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Build and register the next frame.
    pub fn next_frame(&mut self) -> Result<Arc<Menu>, MenuError> {
        self.ensure_room()?;
        let frame = self.builder.build();
        self.frames.push(Arc::clone(&frame));
        Ok(frame)
    }

    /// Build and register the next frame under its own title.
    pub fn next_frame_titled(&mut self, title: impl Into<String>) -> Result<Arc<Menu>, MenuError> {
        self.ensure_room()?;
        let frame = self.builder.clone().title(title).build();
        self.frames.push(Arc::clone(&frame));
        Ok(frame)
    }

    /// Register a frame built elsewhere.
    pub fn add_frame(&mut self, frame: Arc<Menu>) -> Result<(), MenuError> {
        self.ensure_room()?;
        self.frames.push(frame);
        Ok(())
    }

    fn ensure_room(&self) -> Result<(), MenuError> {
        if self.frames.len() >= self.capacity {
            return Err(MenuError::FramesExhausted {
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    pub fn frames(&self) -> &[Arc<Menu>] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&Arc<Menu>> {
        self.frames.get(index)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// A player showing the registered frames to `viewer`, or `None` when
    /// there is nothing to show.
    pub fn play(&self, viewer: ViewerId) -> Option<FramePlayer> {
        if self.frames.is_empty() {
            return None;
        }
        Some(FramePlayer {
            frames: self.frames.clone(),
            viewer,
            interval: self.interval,
            looping: self.looping,
            next: 0,
            started: false,
        })
    }
}

/// Cycles an [`AnimatedMenu`]'s frames for one viewer.
#[derive(Debug)]
pub struct FramePlayer {
    frames: Vec<Arc<Menu>>,
    viewer: ViewerId,
    interval: Duration,
    looping: bool,
    next: usize,
    started: bool,
}

impl FramePlayer {
    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    pub fn viewer(&self) -> ViewerId {
        self.viewer
    }

    /// Show the next frame. Returns `false` once the timer should be
    /// cancelled: the animation ended, or the viewer left the frame shown
    /// last.
    pub fn tick(&mut self) -> bool {
        let len = self.frames.len();
        if len == 0 {
            return false;
        }
        if self.next >= len {
            if !self.looping {
                return false;
            }
            self.next = 0;
        }
        if self.started {
            let previous = &self.frames[(self.next + len - 1) % len];
            if !previous.is_open(self.viewer) {
                log::debug!("{}: left animation, stopping", self.viewer);
                return false;
            }
        }
        self.frames[self.next].open(self.viewer);
        self.started = true;
        self.next += 1;
        self.looping || self.next < len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Runtime;
    use trove_core::{HeadlessHost, ItemStack};

    fn animation(capacity: usize) -> (Arc<HeadlessHost>, AnimatedMenu) {
        let host = Arc::new(HeadlessHost::new());
        let rt = Runtime::new(host.clone());
        let builder = rt.chest(1).expect("rows").title("Spin");
        (host, AnimatedMenu::new(builder, capacity, Duration::from_millis(50)))
    }

    #[test]
    fn capacity_is_enforced_without_damage() {
        let (_, mut anim) = animation(2);
        let first = anim.next_frame().expect("room");
        first.slot(0).expect("slot").set_item(Some(ItemStack::one("clock")));
        anim.next_frame_titled("Spin 2").expect("room");
        assert_eq!(
            anim.next_frame().err(),
            Some(MenuError::FramesExhausted { capacity: 2 })
        );
        let extra = anim.frames()[0].runtime().hopper().build();
        assert!(anim.add_frame(extra).is_err());
        assert_eq!(anim.frames().len(), 2);
        assert!(Arc::ptr_eq(&anim.frames()[0], &first));
        assert_eq!(anim.frames()[1].title(), "Spin 2");
        assert!(anim.frames().iter().all(|f| f.is_redraw()));
    }

    #[test]
    fn frames_redraw_in_place() {
        let (host, mut anim) = animation(3);
        for _ in 0..3 {
            anim.next_frame().expect("room");
        }
        let mut player = anim.play(ViewerId(1)).expect("frames");
        assert!(player.tick());
        assert!(player.tick());
        assert!(!player.tick());
        assert!(!player.tick());
        assert_eq!(host.stats().opened, 1);
        assert_eq!(host.stats().retitled, 2);
        assert!(anim.frames()[2].is_open(ViewerId(1)));
    }

    #[test]
    fn leaving_stops_the_player() {
        let (_, mut anim) = animation(3);
        for _ in 0..3 {
            anim.next_frame().expect("room");
        }
        let mut player = anim.play(ViewerId(1)).expect("frames");
        assert!(player.tick());
        anim.frames()[0].close(ViewerId(1)).expect("open");
        assert!(!player.tick());
        assert!(!anim.frames()[1].is_open(ViewerId(1)));
    }

    #[test]
    fn looping_wraps_around() {
        let (_, mut anim) = animation(2);
        anim.next_frame().expect("room");
        anim.next_frame().expect("room");
        let anim = anim.looping(true);
        let mut player = anim.play(ViewerId(5)).expect("frames");
        for _ in 0..5 {
            assert!(player.tick());
        }
        assert!(anim.frames()[0].is_open(ViewerId(5)));
    }

    #[test]
    fn empty_animation_has_no_player() {
        let (_, anim) = animation(4);
        assert!(anim.play(ViewerId(1)).is_none());
    }
}
