mod deadline;
mod determinism;
mod link;
mod proportional_fair;
mod wfq;
