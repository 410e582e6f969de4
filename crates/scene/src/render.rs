use crate::World;
use crate::camera::Camera3D;
use crate::components::{Shape3D, Transform};
use crate::light::{AmbientLight, DebugLine, DirectionalLight};

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum RenderCommand {
    Draw3D { transform: Transform, shape: Shape3D },
    Sun { light: DirectionalLight },
    Ambient { light: AmbientLight },
    DebugLine { line: DebugLine },
}

/// One frame's worth of draw commands, in deterministic order: lights
/// first, then drawables in entity-index order, then debug primitives.
#[derive(Debug, Default)]
pub struct RenderFrame {
    pub commands: Vec<RenderCommand>,
}

pub fn collect(
    world: &World,
    _camera: Camera3D,
    sun: Option<DirectionalLight>,
    ambient: AmbientLight,
    debug_line: Option<DebugLine>,
) -> RenderFrame {
    let mut frame = RenderFrame::default();
    if let Some(light) = sun {
        frame.commands.push(RenderCommand::Sun { light });
    }
    frame.commands.push(RenderCommand::Ambient { light: ambient });
    for (_, transform, drawable) in world.drawables_3d() {
        frame.commands.push(RenderCommand::Draw3D {
            transform,
            shape: drawable.shape,
        });
    }
    if let Some(line) = debug_line {
        frame.commands.push(RenderCommand::DebugLine { line });
    }
    frame
}
