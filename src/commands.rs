use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use enumerables::{
    Catalog, EnumError, Enumeration, FlagSet, StateMachine, TransitionGraph, ValueDomain,
};

use crate::ui::Printer;

pub fn values(catalog: &Catalog, kind: Option<&str>, printer: &Printer) -> Result<()> {
    match kind {
        Some(kind) => {
            let kind_ref = catalog.lookup(kind)?;
            printer.print_kind(kind, &kind_ref);
        }
        None if catalog.is_empty() => printer.note("catalog is empty"),
        None => {
            for (kind, kind_ref) in catalog.kinds() {
                printer.print_kind(kind, &kind_ref);
            }
        }
    }
    Ok(())
}

pub fn check(catalog: &Catalog, kind: &str, value: &str, printer: &Printer) -> Result<()> {
    let domain = catalog.enumeration(kind)?;
    match Enumeration::of(domain, value) {
        Ok(valid) => {
            printer.ok(&format!("{kind}::{} = {valid}", valid.name()));
            Ok(())
        }
        Err(err) => {
            printer.fail(&err.to_string());
            Err(err.into())
        }
    }
}

pub fn flags(
    catalog: &Catalog,
    kind: &str,
    bits: u64,
    add: &[u64],
    remove: &[u64],
    printer: &Printer,
) -> Result<()> {
    let domain = catalog.flags(kind)?;
    let mut set = FlagSet::of(domain, bits)?;
    for &flags in add {
        set = set
            .add(flags)
            .with_context(|| format!("adding {flags} to {set}"))?;
    }
    for &flags in remove {
        set = set.remove(flags);
    }
    debug!(kind, bits = set.bits(), "derived flag set");

    if set.is_empty() {
        printer.note(&format!("{kind} = 0 (no flags)"));
    } else {
        printer.ok(&format!("{kind} = {set} [{}]", set.named_values().join(", ")));
    }
    Ok(())
}

pub fn walk(
    catalog: &Catalog,
    kind: &str,
    initial: &str,
    states: &[String],
    note: Option<&str>,
    printer: &Printer,
) -> Result<()> {
    let graph = catalog.state_graph(kind)?;
    let machine = run_walk(graph, initial, states, note, printer)?;
    printer.print_log(&machine);
    Ok(())
}

fn run_walk(
    graph: &Arc<TransitionGraph>,
    initial: &str,
    states: &[String],
    note: Option<&str>,
    printer: &Printer,
) -> Result<StateMachine> {
    let mut machine = StateMachine::of(graph, initial)?;
    printer.ok(&format!("started at {}", machine.value()));

    for to in states {
        let next = match note {
            Some(note) => machine.transition_with_note(to, note),
            None => machine.transition(to),
        };
        machine = match next {
            Ok(next) => next,
            Err(err @ EnumError::IllegalTransition { .. }) => {
                let allowed = machine
                    .possible_transitions()
                    .map(|targets| targets.join(", "))
                    .unwrap_or_else(|| "any".to_string());
                printer.fail(&err.to_string());
                printer.note(&format!("allowed from {}: [{allowed}]", machine.value()));
                return Err(err.into());
            }
            Err(err) => return Err(err.into()),
        };
        printer.ok(&format!("moved to {}", machine.value()));
    }
    Ok(machine)
}

/// Steps Paso1..Paso4 with `Paso1 -> [Paso2, Paso3]` and nothing else declared.
pub fn demo_graph() -> Result<Arc<TransitionGraph>> {
    let domain = ValueDomain::builder("Step")
        .value("STEP_1", "Paso1".to_string())
        .value("STEP_2", "Paso2".to_string())
        .value("STEP_3", "Paso3".to_string())
        .value("STEP_4", "Paso4".to_string())
        .build()?;
    let graph = TransitionGraph::builder(Arc::new(domain))
        .initial("Paso1")
        .edges("Paso1", ["Paso2", "Paso3"])
        .build()?;
    Ok(Arc::new(graph))
}

pub fn demo(printer: &Printer) -> Result<()> {
    let graph = demo_graph()?;

    printer.note("Paso1 -> Paso4 is not declared:");
    if let Err(err) = StateMachine::of(&graph, "Paso1")?.transition("Paso4") {
        printer.fail(&err.to_string());
    }

    printer.note("Paso2 has no edges, so any step may follow it:");
    let machine = run_walk(
        &graph,
        "Paso1",
        &["Paso2".to_string(), "Paso4".to_string()],
        Some("demo"),
        printer,
    )?;
    printer.print_log(&machine);
    Ok(())
}
