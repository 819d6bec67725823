//! A tiny line-oriented command language for driving a [`BalancedTree`] from a file or a
//! terminal.
//!
//! ```text
//! # Build the tree from the insert cascade.
//! insert 10 20 30 40 50 60 70 80
//! update 20 25
//! remove 10 80
//! search 40
//! preorder
//! keys
//! print
//! check
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. `update` is the checked
//! [`BalancedTree::try_update`], so a script can never leave the tree misordered.

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use log::{debug, info};

use crate::error::ScriptError;
use crate::BalancedTree;

/// One parsed line of a script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command<K> {
    /// `insert <key>...`
    Insert(Vec<K>),
    /// `remove <key>...`
    Remove(Vec<K>),
    /// `update <old> <new>`
    Update(K, K),
    /// `search <key>`
    Search(K),
    /// `preorder`
    PreOrder,
    /// `keys`
    Keys,
    /// `height`
    Height,
    /// `print`
    Print,
    /// `check`
    Check,
}

impl<K: FromStr> Command<K> {
    /// Parses one line. Returns `Ok(None)` for blank lines and comments.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::script::Command;
    ///
    /// assert_eq!(
    ///     Command::<i32>::parse("update 20 25").unwrap(),
    ///     Some(Command::Update(20, 25))
    /// );
    /// assert_eq!(Command::<i32>::parse("  # comment").unwrap(), None);
    /// assert!(Command::<i32>::parse("insert ten").is_err());
    /// ```
    pub fn parse(line: &str) -> Result<Option<Self>, ScriptError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        if name.starts_with('#') {
            return Ok(None);
        }
        let args: Vec<&str> = words.collect();

        let command = match name {
            "insert" => Self::Insert(parse_some("insert", &args)?),
            "remove" | "delete" => Self::Remove(parse_some("remove", &args)?),
            "update" => match args.as_slice() {
                [old, new] => Self::Update(parse_key(old)?, parse_key(new)?),
                _ => {
                    return Err(ScriptError::Arity {
                        command: "update",
                        expected: "an old and a new key",
                    })
                }
            },
            "search" | "find" => match args.as_slice() {
                [key] => Self::Search(parse_key(key)?),
                _ => {
                    return Err(ScriptError::Arity {
                        command: "search",
                        expected: "exactly one key",
                    })
                }
            },
            "preorder" => no_args("preorder", &args, Self::PreOrder)?,
            "keys" => no_args("keys", &args, Self::Keys)?,
            "height" => no_args("height", &args, Self::Height)?,
            "print" => no_args("print", &args, Self::Print)?,
            "check" => no_args("check", &args, Self::Check)?,
            other => return Err(ScriptError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }
}

impl<K> Command<K>
where
    K: Ord + Clone + fmt::Display,
{
    /// Applies the command to `tree`. Returns the text to show the user, if the command
    /// produces any.
    pub fn run(self, tree: &mut BalancedTree<K>) -> Result<Option<String>, ScriptError> {
        let output = match self {
            Self::Insert(keys) => {
                tree.extend(keys);
                None
            }
            Self::Remove(keys) => {
                for key in &keys {
                    tree.remove(key);
                }
                None
            }
            Self::Update(old, new) => {
                tree.try_update(&old, new)?;
                None
            }
            Self::Search(key) => Some(match tree.search(&key) {
                Some(node) => format!(
                    "found {} (height {}, balance {})",
                    node.key(),
                    node.height(),
                    node.balance_factor()
                ),
                None => format!("{key} not found"),
            }),
            Self::PreOrder => Some(join(tree.pre_order())),
            Self::Keys => Some(join(&tree.keys())),
            Self::Height => Some(tree.height().to_string()),
            Self::Print => Some(tree.to_string()),
            Self::Check => {
                tree.check_invariants()?;
                Some("ok".to_string())
            }
        };
        Ok(output)
    }
}

/// Runs every line of `script` against `tree`, writing command output to `out`. With
/// `check_each`, every invariant is validated after each command. Stops at the first error,
/// which carries the 1-based line number.
pub fn run_script<K, R, W>(
    script: R,
    tree: &mut BalancedTree<K>,
    check_each: bool,
    mut out: W,
) -> Result<(), ScriptError>
where
    K: FromStr + Ord + Clone + fmt::Display,
    R: BufRead,
    W: Write,
{
    for (i, line) in script.lines().enumerate() {
        let line_no = i + 1;
        let at_line = |source: ScriptError| ScriptError::Line {
            line: line_no,
            source: Box::new(source),
        };

        let line = line?;
        let Some(command) = Command::parse(&line).map_err(at_line)? else {
            continue;
        };
        debug!("line {line_no}: {}", line.trim());

        if let Some(output) = command.run(tree).map_err(at_line)? {
            writeln!(out, "{output}")?;
        }
        if check_each {
            tree.check_invariants()
                .map_err(|err| at_line(err.into()))?;
        }
    }
    info!("script done: {} keys, height {}", tree.len(), tree.height());
    Ok(())
}

fn parse_key<K: FromStr>(word: &str) -> Result<K, ScriptError> {
    word.parse()
        .map_err(|_| ScriptError::InvalidKey(word.to_string()))
}

fn parse_some<K: FromStr>(command: &'static str, args: &[&str]) -> Result<Vec<K>, ScriptError> {
    if args.is_empty() {
        return Err(ScriptError::Arity {
            command,
            expected: "at least one key",
        });
    }
    args.iter().map(|word| parse_key(word)).collect()
}

fn no_args<T>(command: &'static str, args: &[&str], value: T) -> Result<T, ScriptError> {
    if args.is_empty() {
        Ok(value)
    } else {
        Err(ScriptError::Arity {
            command,
            expected: "no arguments",
        })
    }
}

fn join<'a, K: fmt::Display + 'a>(keys: impl IntoIterator<Item = &'a K>) -> String {
    keys.into_iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
