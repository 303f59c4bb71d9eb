//! World asset text rendering
//!
//! The document is written by hand rather than through `ron::ser` because
//! the layout is fixed (two-space indentation, every field comma-terminated,
//! `Vec3(..)`/`Quat(..)` names) and action/blocker lists are raw text.
//!
//! Floats use the shortest decimal that parses back to the same `f32`, with
//! negative zero written as `0`, so `1.0` renders as `1` and `-0.0` as `0`.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use glam::{Quat, Vec3};
use super::{
    EntityCategory, WorldAsset, WorldCollider, WorldInteractable, WorldInteraction, WorldLight, WorldProp,
    WorldSound,
};
use crate::compression;

/// Canonical float text
pub fn format_f32(v: f32) -> String {
    F32(v).to_string()
}

struct F32(f32);

impl fmt::Display for F32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0.0 {
            f.write_str("0")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

struct V3(Vec3);

impl fmt::Display for V3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec3({},{},{})", F32(self.0.x), F32(self.0.y), F32(self.0.z))
    }
}

struct Q(Quat);

impl fmt::Display for Q {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quat({},{},{},{})", F32(self.0.x), F32(self.0.y), F32(self.0.z), F32(self.0.w))
    }
}

/// Double-quoted string with `\` and `"` escaped
struct Quoted<'a>(&'a str);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for c in self.0.chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                c => write!(f, "{}", c)?,
            }
        }
        f.write_str("\"")
    }
}

/// `None` or `Some("...")`
struct OptQuoted<'a>(&'a Option<String>);

impl fmt::Display for OptQuoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(s) => write!(f, "Some({})", Quoted(s)),
            None => f.write_str("None"),
        }
    }
}

fn write_list<T>(
    f: &mut fmt::Formatter<'_>,
    category: EntityCategory,
    items: &[T],
    write_item: fn(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    writeln!(f, "  {}: [", category.field_name())?;
    for item in items {
        write_item(f, item)?;
    }
    writeln!(f, "  ],")
}

fn write_collider(f: &mut fmt::Formatter<'_>, c: &WorldCollider) -> fmt::Result {
    writeln!(f, "    WorldCollider(")?;
    writeln!(f, "      shape: {},", Quoted(&c.shape))?;
    writeln!(f, "      translation: {},", V3(c.translation))?;
    writeln!(f, "      rotation: {},", Q(c.rotation))?;
    writeln!(f, "      scale: {},", V3(c.scale))?;
    writeln!(f, "    ),")
}

fn write_interaction(f: &mut fmt::Formatter<'_>, interaction: &Option<WorldInteraction>) -> fmt::Result {
    let Some(i) = interaction else {
        return writeln!(f, "      interaction: None,");
    };
    writeln!(f, "      interaction: Some(WorldInteraction(")?;
    writeln!(f, "        interaction: {},", Quoted(&i.interaction))?;
    writeln!(f, "        interaction_text: {},", Quoted(&i.interaction_text))?;
    writeln!(f, "        actions: [{}],", i.actions.as_str())?;
    writeln!(f, "        blockers: [{}],", i.blockers.as_str())?;
    writeln!(f, "      )),")
}

fn write_interactable(f: &mut fmt::Formatter<'_>, i: &WorldInteractable) -> fmt::Result {
    writeln!(f, "    WorldInteractable(")?;
    writeln!(f, "      shape: {},", Quoted(&i.shape))?;
    writeln!(f, "      translation: {},", V3(i.translation))?;
    writeln!(f, "      rotation: {},", Q(i.rotation))?;
    writeln!(f, "      scale: {},", V3(i.scale))?;
    write_interaction(f, &i.interaction)?;
    writeln!(f, "    ),")
}

fn write_prop(f: &mut fmt::Formatter<'_>, p: &WorldProp) -> fmt::Result {
    writeln!(f, "    WorldProp(")?;
    writeln!(f, "      prop: {},", Quoted(&p.prop))?;
    writeln!(f, "      translation: {},", V3(p.translation))?;
    writeln!(f, "      rotation: {},", Q(p.rotation))?;
    writeln!(f, "      scale: {},", V3(p.scale))?;
    writeln!(f, "      animatable: {},", OptQuoted(&p.animatable))?;
    writeln!(f, "    ),")
}

fn write_light(f: &mut fmt::Formatter<'_>, l: &WorldLight) -> fmt::Result {
    writeln!(f, "    WorldLight(")?;
    writeln!(f, "      light_type: {},", Quoted(l.light_type.as_str()))?;
    writeln!(f, "      translation: {},", V3(l.translation))?;
    writeln!(f, "      rotation: {},", Q(l.rotation))?;
    writeln!(f, "      scale: {},", V3(l.scale))?;
    writeln!(f, "      watts: {},", F32(l.watts))?;
    writeln!(f, "      animatable: {},", OptQuoted(&l.animatable))?;
    writeln!(f, "    ),")
}

fn write_sound(f: &mut fmt::Formatter<'_>, s: &WorldSound) -> fmt::Result {
    writeln!(f, "    WorldSound(")?;
    writeln!(f, "      sound: {},", Quoted(&s.sound))?;
    writeln!(f, "      translation: {},", V3(s.translation))?;
    writeln!(f, "      paused: {},", s.paused)?;
    writeln!(f, "      animatable: {},", OptQuoted(&s.animatable))?;
    writeln!(f, "    ),")
}

impl fmt::Display for WorldAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "WorldAsset(")?;
        write_list(f, EntityCategory::Collider, self.colliders(), write_collider)?;
        write_list(f, EntityCategory::Interactable, self.interactables(), write_interactable)?;
        write_list(f, EntityCategory::Prop, self.props(), write_prop)?;
        write_list(f, EntityCategory::Light, self.lights(), write_light)?;
        write_list(f, EntityCategory::Sound, self.sounds(), write_sound)?;
        writeln!(f, ")")
    }
}

/// Render the whole document and hand it to `sink` in one write
pub fn write_world_asset<W: Write>(asset: &WorldAsset, sink: &mut W) -> io::Result<()> {
    let text = asset.to_ron_string();
    sink.write_all(text.as_bytes())?;
    sink.flush()
}

/// Write a rendered document to a file, brotli-compressed if asked
pub fn save_world<P: AsRef<Path>>(text: &str, path: P, compress: bool) -> io::Result<()> {
    if compress {
        fs::write(path, compression::compress(text.as_bytes())?)
    } else {
        fs::write(path, text)
    }
}
