pub mod app {
    pub mod handler;
    pub mod machine;
    pub mod orchestrator;
    pub mod state;
    #[cfg(test)]
    pub(crate) mod testkit;
    pub mod view;
}

pub mod constants;

pub mod libs {
    pub mod config;
    pub mod tui;
    pub mod wallet;
    pub mod writing;
}
