use umbra_engine::coords::Vec2;

/// The point every polygon flees from.
///
/// Written whenever the host reports a pointer position (last write wins) and
/// read once per frame by the shadow projector and the integrator. Starts at
/// the world origin until the pointer first moves.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Attractor {
    position: Vec2,
}

impl Attractor {
    #[inline]
    pub const fn new(position: Vec2) -> Self {
        Self { position }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Records a new pointer position. Non-finite positions are ignored.
    pub fn set(&mut self, position: Vec2) {
        if position.is_finite() {
            self.position = position;
        } else {
            log::debug!("ignoring non-finite attractor position {position:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_origin() {
        assert_eq!(Attractor::default().position(), Vec2::zero());
    }

    #[test]
    fn last_write_wins() {
        let mut a = Attractor::default();
        a.set(Vec2::new(1.0, 1.0));
        a.set(Vec2::new(400.0, 300.0));
        assert_eq!(a.position(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn non_finite_position_is_ignored() {
        let mut a = Attractor::new(Vec2::new(5.0, 5.0));
        a.set(Vec2::new(f32::NAN, 0.0));
        assert_eq!(a.position(), Vec2::new(5.0, 5.0));
    }
}
