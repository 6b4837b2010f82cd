//! Point-mass bodies advanced with semi-implicit Euler.
//!
//! Velocity is updated from force first, then position from the new velocity.
//! There is no sub-stepping and no built-in collision response; see
//! [`crate::collision`] for the rollback policy.

use glam::Vec3;

/// Position, velocity and accumulated force of a unit-mass point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RigidBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub force: Vec3,
}

impl RigidBody {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// `velocity += dt * force; position += dt * (velocity + extra_velocity)`.
    #[inline]
    pub fn integrate_with(&mut self, dt: f32, extra_velocity: Vec3) {
        self.velocity += dt * self.force;
        self.position += dt * (self.velocity + extra_velocity);
    }

    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.integrate_with(dt, Vec3::ZERO);
    }

    pub fn set_force(&mut self, force: Vec3) {
        self.force = force;
    }

    pub fn add_force(&mut self, force: Vec3) {
        self.force += force;
    }

    pub fn reset_force(&mut self) {
        self.force = Vec3::ZERO;
    }

    pub fn reset_velocity(&mut self) {
        self.velocity = Vec3::ZERO;
    }
}

/// Anything the frame driver integrates and collides against the grid.
pub trait Kinematic {
    fn body(&self) -> &RigidBody;

    fn body_mut(&mut self) -> &mut RigidBody;

    /// Advances one step of length `dt`.
    fn integrate(&mut self, dt: f32);

    fn position(&self) -> Vec3 {
        self.body().position
    }

    fn set_position(&mut self, position: Vec3) {
        self.body_mut().position = position;
    }

    fn velocity(&self) -> Vec3 {
        self.body().velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.body_mut().velocity = velocity;
    }

    fn set_force(&mut self, force: Vec3) {
        self.body_mut().set_force(force);
    }

    fn add_force(&mut self, force: Vec3) {
        self.body_mut().add_force(force);
    }

    fn reset_force(&mut self) {
        self.body_mut().reset_force();
    }

    fn reset_velocity(&mut self) {
        self.body_mut().reset_velocity();
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// The user-controlled body.
///
/// `move_velocity` comes from input and is added on top of the physics
/// velocity during integration. Collision rollback clears only the physics
/// part, so held movement keys keep working after a bump.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Player {
    pub body: RigidBody,
    pub move_velocity: Vec3,
}

impl Player {
    pub fn at(position: Vec3) -> Self {
        Self {
            body: RigidBody::at(position),
            move_velocity: Vec3::ZERO,
        }
    }

    pub fn set_move_velocity(&mut self, move_velocity: Vec3) {
        self.move_velocity = move_velocity;
    }
}

impl Kinematic for Player {
    fn body(&self) -> &RigidBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut RigidBody {
        &mut self.body
    }

    fn integrate(&mut self, dt: f32) {
        self.body.integrate_with(dt, self.move_velocity);
    }
}

// ---------------------------------------------------------------------------
// Pet
// ---------------------------------------------------------------------------

/// A passive companion body with a render scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pet {
    pub body: RigidBody,
    pub scale: f32,
}

impl Pet {
    pub fn at(position: Vec3, scale: f32) -> Self {
        Self {
            body: RigidBody::at(position),
            scale,
        }
    }
}

impl Default for Pet {
    fn default() -> Self {
        Self::at(Vec3::ZERO, 1.0)
    }
}

impl Kinematic for Pet {
    fn body(&self) -> &RigidBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut RigidBody {
        &mut self.body
    }

    fn integrate(&mut self, dt: f32) {
        self.body.integrate(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_semi_implicit_order() {
        let g = 9.81;
        let dt = 0.1;
        let mut body = RigidBody::at(Vec3::ZERO);
        body.set_force(Vec3::new(0.0, -g, 0.0));
        body.integrate(dt);
        assert!((body.velocity.y + dt * g).abs() < EPS, "velocity {}", body.velocity.y);
        assert!((body.position.y + dt * dt * g).abs() < EPS, "position {}", body.position.y);
    }

    #[test]
    fn test_force_accumulates_until_reset() {
        let mut body = RigidBody::default();
        body.add_force(Vec3::X);
        body.add_force(Vec3::Y);
        assert_eq!(body.force, Vec3::new(1.0, 1.0, 0.0));
        body.reset_force();
        assert_eq!(body.force, Vec3::ZERO);
        body.set_force(Vec3::Z);
        assert_eq!(body.force, Vec3::Z);
    }

    #[test]
    fn test_player_adds_move_velocity() {
        let mut player = Player::at(Vec3::ZERO);
        player.set_move_velocity(Vec3::new(2.0, 0.0, 0.0));
        player.set_velocity(Vec3::new(0.0, 1.0, 0.0));
        player.integrate(0.5);
        assert_eq!(player.position(), Vec3::new(1.0, 0.5, 0.0));
        assert_eq!(player.velocity(), Vec3::new(0.0, 1.0, 0.0), "move velocity must stay separate");
    }

    #[test]
    fn test_reset_velocity_keeps_move_velocity() {
        let mut player = Player::at(Vec3::ZERO);
        player.set_move_velocity(Vec3::X);
        player.set_velocity(Vec3::Y);
        player.reset_velocity();
        assert_eq!(player.velocity(), Vec3::ZERO);
        assert_eq!(player.move_velocity, Vec3::X);
    }

    #[test]
    fn test_pet_integrates_force() {
        let mut pet = Pet::at(Vec3::ONE, 0.5);
        pet.set_force(Vec3::new(0.0, 0.0, 4.0));
        pet.integrate(0.5);
        assert_eq!(pet.velocity(), Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(pet.position(), Vec3::new(1.0, 1.0, 2.0));
        assert_eq!(pet.scale, 0.5);
    }
}
