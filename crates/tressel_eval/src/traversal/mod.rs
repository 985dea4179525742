//! Tree traversal drivers.
//!
//! A node's children come from [`Value::children`], which skips absent
//! (`Nil`) children. Every driver visits each reachable node once, except
//! [`Order::DownUp`], which visits each node on the way down and again on
//! the way up.
//!
//! A visitor returning `Ok(())` for a node it has no rule for lets the walk
//! continue; an error stops it and is returned to the caller.

use std::collections::VecDeque;
use std::convert::Infallible;
use std::fmt;

use tressel_patterns::Value;

use crate::errors::MatchError;
use crate::visitor::Visit;

/// Node visiting order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Order {
    /// Node, then each child subtree.
    #[default]
    Preorder,
    /// Each child subtree, then node.
    Postorder,
    /// Breadth first.
    Levelorder,
    /// Node, each child subtree, node again.
    DownUp,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Order::Preorder => "preorder",
            Order::Postorder => "postorder",
            Order::Levelorder => "levelorder",
            Order::DownUp => "downup",
        };
        f.write_str(name)
    }
}

/// Feed every node under `root` to `visitor` in `order`.
#[tracing::instrument(level = "debug", skip(root, visitor))]
pub fn traverse(root: &Value, visitor: &mut dyn Visit, order: Order) -> Result<(), MatchError> {
    drive(root, order, &mut |node| visitor.visit_node(node))
}

/// The nodes under `root` in visiting order.
pub fn walk(root: &Value, order: Order) -> Vec<Value> {
    let mut nodes = Vec::new();
    let collected: Result<(), Infallible> = drive(root, order, &mut |node| {
        nodes.push(node.clone());
        Ok(())
    });
    match collected {
        Ok(()) => nodes,
        Err(never) => match never {},
    }
}

fn drive<E>(
    root: &Value,
    order: Order,
    visit: &mut dyn FnMut(&Value) -> Result<(), E>,
) -> Result<(), E> {
    match order {
        Order::Levelorder => levelorder(root, visit),
        order => depth_first(root, order, visit),
    }
}

/// Pending work for the depth-first drivers.
enum Step {
    /// First arrival at a node; its children are not yet scheduled.
    Enter(Value),
    /// All children of the node are done.
    Leave(Value),
}

// Depth-first with an explicit stack, so tree depth is bounded by memory
// rather than by the call stack.
fn depth_first<E>(
    root: &Value,
    order: Order,
    visit: &mut dyn FnMut(&Value) -> Result<(), E>,
) -> Result<(), E> {
    let on_enter = matches!(order, Order::Preorder | Order::DownUp);
    let on_leave = matches!(order, Order::Postorder | Order::DownUp);
    let mut stack = vec![Step::Enter(root.clone())];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(node) => {
                if on_enter {
                    visit(&node)?;
                }
                let children = node.children();
                if on_leave {
                    stack.push(Step::Leave(node));
                }
                stack.extend(children.into_iter().rev().map(Step::Enter));
            }
            Step::Leave(node) => visit(&node)?,
        }
    }
    Ok(())
}

fn levelorder<E>(
    root: &Value,
    visit: &mut dyn FnMut(&Value) -> Result<(), E>,
) -> Result<(), E> {
    let mut queue = VecDeque::from([root.clone()]);
    while let Some(node) = queue.pop_front() {
        queue.extend(node.children());
        visit(&node)?;
    }
    Ok(())
}
