// SPDX-License-Identifier: MPL-2.0
use galeria::app::{self, Flags};

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        api_url: args.opt_value_from_str("--api-url").ok().flatten(),
    };

    app::run(flags)
}
