use std::io;

use avl::script::run_script;
use avl::{BalancedTree, ScriptError};
use quickcheck_macros::quickcheck;

use crate::Op;

/// Writes `ops` out as script lines.
fn render(ops: &[Op<i8>]) -> String {
    let mut script = String::new();
    for op in ops {
        let line = match op {
            Op::Insert(k) => format!("insert {k}"),
            Op::Remove(k) => format!("remove {k}"),
            // Rekeys that break the ordering would stop the script, so only keep the
            // harmless ones.
            Op::Update(old, new) if old == new => format!("update {old} {new}"),
            Op::Update(..) => "# skipped".to_string(),
        };
        script.push_str(&line);
        script.push('\n');
    }
    script
}

#[quickcheck]
fn scripts_match_direct_calls(ops: Vec<Op<i8>>) -> bool {
    let mut direct = BalancedTree::new();
    for op in &ops {
        match op {
            Op::Insert(k) => direct.insert(*k),
            Op::Remove(k) => {
                direct.remove(k);
            }
            Op::Update(..) => {}
        }
    }

    let mut scripted = BalancedTree::<i8>::new();
    let mut out = Vec::new();
    let script = render(&ops);
    // Updating an absent key is an error, so stop comparing at the first one.
    match run_script(script.as_bytes(), &mut scripted, true, &mut out) {
        Ok(()) => scripted.pre_order().eq(direct.pre_order()) && out.is_empty(),
        Err(ScriptError::Line { source, .. }) => matches!(*source, ScriptError::Update(_)),
        Err(_) => false,
    }
}

#[test]
fn full_session() {
    let script = "\
# insert the cascade
insert 10 20 30 40 50 60 70 80

update 20 25
update 60 65
remove 10 80
preorder
print
check
";
    let mut tree = BalancedTree::<i64>::new();
    let mut out = Vec::new();

    run_script(script.as_bytes(), &mut tree, false, &mut out).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "40 25 30 65 50 70
40
├─ 25
│  ├─ ∅
│  └─ 30
└─ 65
   ├─ 50
   └─ 70
ok
"
    );
}

#[test]
fn unknown_command_reports_its_line() {
    let mut tree = BalancedTree::<i64>::new();
    let err = run_script("insert 1\n\nbalance\n".as_bytes(), &mut tree, false, io::sink())
        .unwrap_err();

    assert_eq!(err.to_string(), "line 3: unknown command `balance`");
}
