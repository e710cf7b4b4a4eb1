use clap::Parser;

#[derive(Parser)]
#[command(
    name = "wireframe-render",
    about = "Render a Wireframe view through the template renderer",
    version
)]
pub struct Cli {
    /// View type (view, layout, partial or component)
    pub view_type: String,

    /// View file, relative to the view type's directory
    pub view: String,

    /// Site templates directory containing views/, layouts/, partials/ and components/
    #[arg(short, long, default_value = ".")]
    pub root: String,

    /// Renderer settings file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Cache directory, overriding the settings file
    #[arg(long)]
    pub cache: Option<String>,

    /// Default template extension, overriding the settings file
    #[arg(long)]
    pub ext: Option<String>,

    /// Register layouts, partials and components as template namespaces
    #[arg(long)]
    pub namespaces: bool,

    /// Set context variables (can be repeated: -d key=value)
    #[arg(short, long = "data", value_name = "KEY=VALUE")]
    pub data: Vec<String>,
}
