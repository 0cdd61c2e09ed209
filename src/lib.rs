pub mod shared {
    pub mod infrastructure {
        pub mod record_store;
        pub mod report_store;
    }
}

pub mod modules {
    pub mod cohort_hours {
        pub mod core {
            pub mod ingest;
            pub mod reconcile;
            pub mod records;
            pub mod report;
            pub mod week;
        }
        pub mod use_cases {
            pub mod upload_time_entries {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod upload_roster {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod list_projects {
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod generate_report {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod download_report {
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod report_size {
                pub mod inbound {
                    pub mod http;
                }
            }
        }
    }
}

pub mod shell;
