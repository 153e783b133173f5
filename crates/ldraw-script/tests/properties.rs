// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Property tests over generated scenes: framing, determinism, default elision.
#![allow(clippy::unwrap_used)]

use ldraw_core::{Colour, Keyword, Mat4, Vec2, Vec3};
use ldraw_script::frame::{self, Chunk};
use ldraw_script::{Builder, Object, Scope};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Recipe {
    Group {
        name: String,
        colour: u32,
        pos: Vec3,
        children: Vec<Recipe>,
    },
    Points {
        name: String,
        pts: Vec<Vec3>,
        coloured: bool,
        size: f32,
    },
    Box {
        dim: Vec3,
        pos: Vec3,
        wireframe: bool,
    },
    Polygon {
        pts: Vec<Vec2>,
        solid: bool,
    },
    Commands {
        scene: i32,
        target: String,
        o2w: Vec3,
    },
}

fn coord() -> impl Strategy<Value = f32> {
    (-64i16..64).prop_map(|v| f32::from(v) * 0.5)
}

fn vec3() -> impl Strategy<Value = Vec3> {
    (coord(), coord(), coord()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn vec2() -> impl Strategy<Value = Vec2> {
    (coord(), coord()).prop_map(|(x, y)| Vec2::new(x, y))
}

fn name() -> impl Strategy<Value = String> {
    "[a-z]{0,6}"
}

fn leaf() -> impl Strategy<Value = Recipe> {
    prop_oneof![
        (name(), prop::collection::vec(vec3(), 0..5), any::<bool>(), coord())
            .prop_map(|(name, pts, coloured, size)| Recipe::Points { name, pts, coloured, size }),
        (vec3(), vec3(), any::<bool>())
            .prop_map(|(dim, pos, wireframe)| Recipe::Box { dim, pos, wireframe }),
        (prop::collection::vec(vec2(), 0..5), any::<bool>())
            .prop_map(|(pts, solid)| Recipe::Polygon { pts, solid }),
        (any::<i32>(), name(), vec3())
            .prop_map(|(scene, target, o2w)| Recipe::Commands { scene, target, o2w }),
    ]
}

fn recipe() -> impl Strategy<Value = Recipe> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        (name(), any::<u32>(), vec3(), prop::collection::vec(inner, 0..4)).prop_map(
            |(name, colour, pos, children)| Recipe::Group {
                name,
                colour,
                pos,
                children,
            },
        )
    })
}

fn forest() -> impl Strategy<Value = Vec<Recipe>> {
    prop::collection::vec(recipe(), 0..4)
}

/// Resets every optional attribute to its default.
fn strip(recipe: &Recipe) -> Recipe {
    match recipe {
        Recipe::Group { children, .. } => Recipe::Group {
            name: String::new(),
            colour: Colour::WHITE.argb(),
            pos: Vec3::ZERO,
            children: children.iter().map(strip).collect(),
        },
        Recipe::Points { pts, .. } => Recipe::Points {
            name: String::new(),
            pts: pts.clone(),
            coloured: false,
            size: 0.0,
        },
        Recipe::Box { dim, .. } => Recipe::Box {
            dim: *dim,
            pos: Vec3::ZERO,
            wireframe: false,
        },
        Recipe::Polygon { pts, .. } => Recipe::Polygon {
            pts: pts.clone(),
            solid: false,
        },
        other @ Recipe::Commands { .. } => other.clone(),
    }
}

fn apply<S: Scope>(scope: &mut S, recipe: &Recipe) {
    match recipe {
        Recipe::Group {
            name,
            colour,
            pos,
            children,
        } => {
            let mut g = scope.group(name.as_str(), *colour);
            g.pos(*pos);
            for child in children {
                apply(&mut g, child);
            }
        }
        Recipe::Points {
            name,
            pts,
            coloured,
            size,
        } => {
            let mut p = scope.points(name.as_str(), Colour::WHITE);
            p.size(*size);
            for (i, pt) in pts.iter().enumerate() {
                if *coloured {
                    p.pt_col(*pt, 0xFF00_0000 | u32::try_from(i).unwrap()).unwrap();
                } else {
                    p.pt(*pt).unwrap();
                }
            }
        }
        Recipe::Box {
            dim,
            pos,
            wireframe,
        } => {
            scope
                .r#box("", Colour::WHITE)
                .dim(*dim)
                .pos(*pos)
                .wireframe(*wireframe);
        }
        Recipe::Polygon { pts, solid } => {
            let mut p = scope.polygon("", Colour::WHITE);
            p.solid(*solid);
            for pt in pts {
                p.pt(*pt).unwrap();
            }
        }
        Recipe::Commands { scene, target, o2w } => {
            scope
                .command()
                .add_to_scene(*scene)
                .transform_object(target.as_str(), Mat4::translation(*o2w))
                .unwrap();
        }
    }
}

fn build(recipes: &[Recipe]) -> Builder {
    let mut b = Builder::new();
    for r in recipes {
        apply(&mut b, r);
    }
    b
}

/// Chunks whose payload is itself a chunk sequence.
fn is_container(chunk: &Chunk<'_>) -> bool {
    matches!(
        chunk.keyword(),
        Some(
            Keyword::Group
                | Keyword::Point
                | Keyword::Box
                | Keyword::Polygon
                | Keyword::Commands
                | Keyword::O2W
        )
    )
}

/// Walks every container chunk, collecting every keyword seen.
fn walk(bytes: &[u8], seen: &mut Vec<Keyword>) -> Result<usize, TestCaseError> {
    let mut total = 0;
    for chunk in frame::chunks(bytes) {
        let chunk = chunk.map_err(|e| TestCaseError::fail(e.to_string()))?;
        total += chunk.total_len();
        if let Some(k) = chunk.keyword() {
            seen.push(k);
        }
        if is_container(&chunk) {
            let inner = walk(chunk.payload, seen)?;
            prop_assert_eq!(inner, chunk.payload.len());
        }
    }
    Ok(total)
}

const ELIDABLE: [Keyword; 9] = [
    Keyword::Name,
    Keyword::Colour,
    Keyword::O2W,
    Keyword::AxisId,
    Keyword::Wireframe,
    Keyword::Solid,
    Keyword::PerItemColour,
    Keyword::Depth,
    Keyword::Size,
];

proptest! {
    #[test]
    fn every_chunk_spans_its_payload(recipes in forest()) {
        let bytes = build(&recipes).to_bytes();
        let mut seen = Vec::new();
        prop_assert_eq!(walk(&bytes, &mut seen)?, bytes.len());
        prop_assert_eq!(
            frame::chunks(&bytes).count(),
            recipes.len()
        );
    }

    #[test]
    fn emission_is_deterministic(recipes in forest()) {
        let a = build(&recipes);
        let b = build(&recipes);
        prop_assert_eq!(a.to_bytes(), a.to_bytes());
        prop_assert_eq!(a.to_string(), a.to_string());
        prop_assert_eq!(a.to_bytes(), b.to_bytes());
        prop_assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn defaults_leave_no_trace(recipes in forest()) {
        let stripped: Vec<_> = recipes.iter().map(strip).collect();
        let b = build(&stripped);

        let text = b.to_string();
        for kw in ELIDABLE {
            let token = format!("*{} ", kw.name());
            prop_assert!(!text.contains(&token), "{} in {}", token, text);
        }

        let bytes = b.to_bytes();
        let mut seen = Vec::new();
        walk(&bytes, &mut seen)?;
        for kw in ELIDABLE {
            prop_assert!(!seen.contains(&kw), "{} chunk emitted", kw);
        }
    }

    #[test]
    fn braces_balance(recipes in forest()) {
        let text = build(&recipes).to_string();
        let mut depth = 0i64;
        for c in text.chars() {
            match c {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
            prop_assert!(depth >= 0);
        }
        prop_assert_eq!(depth, 0);
    }
}
