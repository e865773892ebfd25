//! Built-in workout plan.
//!
//! The plan groups exercises by muscle group; each group lists primary
//! exercises plus inactive alternates. A structured session walks the
//! active exercises in plan order.

use crate::config::PlanConfig;
use once_cell::sync::Lazy;

/// One exercise slot in the plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanExercise {
    pub name: String,
    /// Inactive exercises are alternates, skipped during sessions.
    pub active: bool,
}

/// A muscle group and its exercises, in plan order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExerciseGroup {
    pub name: String,
    pub exercises: Vec<PlanExercise>,
}

impl ExerciseGroup {
    /// Names of the active exercises in this group.
    pub fn active_exercises(&self) -> impl Iterator<Item = &str> {
        self.exercises
            .iter()
            .filter(|e| e.active)
            .map(|e| e.name.as_str())
    }
}

/// Cached default plan - built once and reused across all operations
static DEFAULT_PLAN: Lazy<Vec<ExerciseGroup>> = Lazy::new(build_default_plan);

/// Get a reference to the cached default plan
pub fn get_default_plan() -> &'static [ExerciseGroup] {
    &DEFAULT_PLAN
}

fn group(name: &str, exercises: &[(&str, bool)]) -> ExerciseGroup {
    ExerciseGroup {
        name: name.into(),
        exercises: exercises
            .iter()
            .map(|&(exercise, active)| PlanExercise {
                name: exercise.into(),
                active,
            })
            .collect(),
    }
}

/// Builds the default plan of muscle groups and exercises
///
/// **Note**: For production use, prefer `get_default_plan()` which
/// returns a cached reference.
pub fn build_default_plan() -> Vec<ExerciseGroup> {
    vec![
        group("Abs", &[("Crunch", true)]),
        group(
            "Triceps",
            &[
                ("Supinated Push Down", true),
                ("Overhead Press (Descending)", false),
                ("Overhead Press (Ascending)", false),
                ("Shoulder Extension (90-0)", false),
            ],
        ),
        group(
            "Back",
            &[
                ("Sagittal Row", true),
                ("Frontal Plane Pulldown", true),
                ("Kelso Row", true),
            ],
        ),
        group("Quads", &[("Leg Extension", true)]),
        group(
            "Hamstrings",
            &[
                ("Seated Curl", true),
                ("Lying Curl", false),
                ("45 Degree Curl", false),
            ],
        ),
        group(
            "Chest",
            &[
                ("Machine Chest Press", true),
                ("Upper", false),
                ("Lower", false),
            ],
        ),
        group(
            "Biceps",
            &[
                ("Recline Curl", true),
                ("30 Degree Curl", false),
                ("Supinations", false),
            ],
        ),
        group(
            "Shoulders",
            &[
                ("Lateral Raise", true),
                ("Rear", false),
                ("Front Delt", false),
            ],
        ),
        group(
            "Forearms",
            &[("Pronated Curl", false), ("Supinated Curl", true)],
        ),
        group(
            "Calves",
            &[("Toes In", true), ("Toes Out", true), ("Seated", true)],
        ),
        group("Glutes", &[("Thrust", true)]),
    ]
}

/// Merge user-configured exercises into the plan.
///
/// Custom exercises append to their named group, or start a new group
/// when no built-in group matches. Custom exercises are always active.
pub fn plan_with_customs(config: &PlanConfig) -> Vec<ExerciseGroup> {
    let mut plan = get_default_plan().to_vec();

    for custom in &config.custom {
        let exercise = PlanExercise {
            name: custom.name.clone(),
            active: true,
        };
        match plan.iter_mut().find(|g| g.name == custom.group) {
            Some(group) => group.exercises.push(exercise),
            None => plan.push(ExerciseGroup {
                name: custom.group.clone(),
                exercises: vec![exercise],
            }),
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CustomExercise;

    #[test]
    fn test_default_plan_has_expected_groups() {
        let plan = get_default_plan();
        assert_eq!(plan.len(), 11);
        assert_eq!(plan[0].name, "Abs");
        assert_eq!(plan.last().unwrap().name, "Glutes");
    }

    #[test]
    fn test_active_exercises_filter_alternates() {
        let plan = get_default_plan();
        let triceps = plan.iter().find(|g| g.name == "Triceps").unwrap();
        let active: Vec<&str> = triceps.active_exercises().collect();
        assert_eq!(active, vec!["Supinated Push Down"]);

        let back = plan.iter().find(|g| g.name == "Back").unwrap();
        assert_eq!(back.active_exercises().count(), 3);
    }

    #[test]
    fn test_every_group_has_an_active_exercise() {
        for group in get_default_plan() {
            assert!(
                group.active_exercises().next().is_some(),
                "group {} has no active exercise",
                group.name
            );
        }
    }

    #[test]
    fn test_customs_merge_into_existing_group() {
        let config = PlanConfig {
            custom: vec![CustomExercise {
                group: "Back".into(),
                name: "Meadows Row".into(),
            }],
        };
        let plan = plan_with_customs(&config);
        let back = plan.iter().find(|g| g.name == "Back").unwrap();
        assert!(back.active_exercises().any(|e| e == "Meadows Row"));
    }

    #[test]
    fn test_customs_create_new_group() {
        let config = PlanConfig {
            custom: vec![CustomExercise {
                group: "Neck".into(),
                name: "Neck Curl".into(),
            }],
        };
        let plan = plan_with_customs(&config);
        assert_eq!(plan.last().unwrap().name, "Neck");
    }
}
