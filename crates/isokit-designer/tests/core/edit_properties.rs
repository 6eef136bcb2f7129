//! Structural invariants of the scene graph under random edit sequences.

use proptest::prelude::*;

use isokit_designer::{
    add_3d_shape, cancel_cut, copy_3d_shape, cut_3d_shape, find_dependent_shapes,
    paste_copied_3d_shapes, paste_cut_3d_shapes, remove_3d_shape, validate_order,
    DiagramComponent,
};

const POSITIONS: [&str; 5] = ["top", "front-left", "front-right", "back-left", "back-right"];

#[derive(Debug, Clone)]
enum Op {
    Add(usize, usize),
    Remove(usize),
    Cut(usize),
    PasteCut(usize, usize),
    Copy(usize),
    PasteCopy(usize, usize),
    CancelCut,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (any::<usize>(), 0..POSITIONS.len()).prop_map(|(t, p)| Op::Add(t, p)),
        1 => any::<usize>().prop_map(Op::Remove),
        1 => any::<usize>().prop_map(Op::Cut),
        1 => (any::<usize>(), 0..POSITIONS.len()).prop_map(|(t, p)| Op::PasteCut(t, p)),
        1 => any::<usize>().prop_map(Op::Copy),
        1 => (any::<usize>(), 0..POSITIONS.len()).prop_map(|(t, p)| Op::PasteCopy(t, p)),
        1 => Just(Op::CancelCut),
    ]
}

fn pick(components: &[DiagramComponent], index: usize) -> Option<String> {
    if components.is_empty() {
        return None;
    }
    Some(components[index % components.len()].id.clone())
}

fn check_cut_is_one_subtree(components: &[DiagramComponent]) -> Result<(), TestCaseError> {
    let Some(head) = components.iter().find(|c| c.cut) else {
        return Ok(());
    };
    let subtree = find_dependent_shapes(components, &head.id);
    for c in components.iter().filter(|c| c.cut) {
        prop_assert!(subtree.contains(&c.id), "{} is cut outside {}", c.id, head.id);
    }
    Ok(())
}

fn check_remove_completeness(
    before: &[DiagramComponent],
    after: &[DiagramComponent],
    id: &str,
) -> Result<(), TestCaseError> {
    let doomed = find_dependent_shapes(before, id);
    prop_assert_eq!(after.len(), before.len() - doomed.ids.len());
    for c in after {
        prop_assert!(!doomed.contains(&c.id));
        if let Some(parent) = c.relative_to_id.as_deref() {
            prop_assert!(after.iter().any(|p| p.id == parent), "dangling {}", parent);
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn edits_preserve_structure(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut components = add_3d_shape(&[], "cube", "center", None, None);
        let mut clipboard: Vec<DiagramComponent> = Vec::new();

        for op in ops {
            let next = match op {
                Op::Add(t, p) => {
                    let target = pick(&components, t);
                    add_3d_shape(&components, "cube", POSITIONS[p], None, target.as_deref())
                }
                Op::Remove(t) => match pick(&components, t) {
                    Some(id) => {
                        let next = remove_3d_shape(&components, &id);
                        check_remove_completeness(&components, &next, &id)?;
                        next
                    }
                    None => components.clone(),
                },
                Op::Cut(t) => match pick(&components, t) {
                    Some(id) => cut_3d_shape(&components, &id),
                    None => components.clone(),
                },
                Op::PasteCut(t, p) => match pick(&components, t) {
                    Some(id) => paste_cut_3d_shapes(&components, &id, POSITIONS[p], None),
                    None => components.clone(),
                },
                Op::Copy(t) => {
                    if let Some(id) = pick(&components, t) {
                        clipboard = copy_3d_shape(&components, &id);
                    }
                    components.clone()
                }
                Op::PasteCopy(t, p) => match pick(&components, t) {
                    Some(id) => {
                        paste_copied_3d_shapes(&components, &clipboard, &id, POSITIONS[p], None)
                    }
                    None => components.clone(),
                },
                Op::CancelCut => cancel_cut(&components, None),
            };

            prop_assert!(validate_order(&next).is_ok());
            check_cut_is_one_subtree(&next)?;
            let mut ids: Vec<&str> = next.iter().map(|c| c.id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), next.len(), "duplicate ids");
            components = next;
        }
    }
}
