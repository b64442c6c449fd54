/// Keyboard bindings for editing the scene
use crossterm::event::KeyCode;
use wire3d_core::{SceneEdit, Vector3};

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    Edit(SceneEdit),
    /// Multiply the edit step by this factor.
    ScaleStep(f32),
    ToggleProjection,
    Reset,
}

pub const HELP: &str = "WASD/RF=Move  Arrows=Look  IJKL/UO=Sphere  +/-=Radius  xyz/XYZ=Normal  ,/.=Dist  [ ]=Step  P=Proj  Q=Quit";

fn axis(x: f32, y: f32, z: f32, step: f32) -> Vector3 {
    Vector3::new(x, y, z) * step
}

/// Map a pressed key to an action, scaling edits by `step`.
pub fn action_for(code: KeyCode, step: f32) -> Option<Action> {
    use SceneEdit::*;

    let edit = match code {
        KeyCode::Esc | KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Char('[') => return Some(Action::ScaleStep(0.1)),
        KeyCode::Char(']') => return Some(Action::ScaleStep(10.0)),
        KeyCode::Char('p') => return Some(Action::ToggleProjection),
        KeyCode::Backspace => return Some(Action::Reset),

        KeyCode::Char('w') => CameraTranslate(axis(0.0, 0.0, 1.0, step)),
        KeyCode::Char('s') => CameraTranslate(axis(0.0, 0.0, -1.0, step)),
        KeyCode::Char('a') => CameraTranslate(axis(-1.0, 0.0, 0.0, step)),
        KeyCode::Char('d') => CameraTranslate(axis(1.0, 0.0, 0.0, step)),
        KeyCode::Char('r') => CameraTranslate(axis(0.0, 1.0, 0.0, step)),
        KeyCode::Char('f') => CameraTranslate(axis(0.0, -1.0, 0.0, step)),

        KeyCode::Up => CameraRotate(axis(-1.0, 0.0, 0.0, step)),
        KeyCode::Down => CameraRotate(axis(1.0, 0.0, 0.0, step)),
        KeyCode::Left => CameraRotate(axis(0.0, -1.0, 0.0, step)),
        KeyCode::Right => CameraRotate(axis(0.0, 1.0, 0.0, step)),

        KeyCode::Char('i') => SphereCenter(axis(0.0, 0.0, 1.0, step)),
        KeyCode::Char('k') => SphereCenter(axis(0.0, 0.0, -1.0, step)),
        KeyCode::Char('j') => SphereCenter(axis(-1.0, 0.0, 0.0, step)),
        KeyCode::Char('l') => SphereCenter(axis(1.0, 0.0, 0.0, step)),
        KeyCode::Char('u') => SphereCenter(axis(0.0, 1.0, 0.0, step)),
        KeyCode::Char('o') => SphereCenter(axis(0.0, -1.0, 0.0, step)),
        KeyCode::Char('+') | KeyCode::Char('=') => SphereRadius(step),
        KeyCode::Char('-') => SphereRadius(-step),

        KeyCode::Char('x') => PlaneNormal(axis(1.0, 0.0, 0.0, step)),
        KeyCode::Char('X') => PlaneNormal(axis(-1.0, 0.0, 0.0, step)),
        KeyCode::Char('y') => PlaneNormal(axis(0.0, 1.0, 0.0, step)),
        KeyCode::Char('Y') => PlaneNormal(axis(0.0, -1.0, 0.0, step)),
        KeyCode::Char('z') => PlaneNormal(axis(0.0, 0.0, 1.0, step)),
        KeyCode::Char('Z') => PlaneNormal(axis(0.0, 0.0, -1.0, step)),
        KeyCode::Char('.') => PlaneDistance(step),
        KeyCode::Char(',') => PlaneDistance(-step),
        _ => return None,
    };
    Some(Action::Edit(edit))
}
