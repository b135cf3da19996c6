pub mod constraint_matching;
