mod common;

mod access;
mod domain;
mod rollup;
