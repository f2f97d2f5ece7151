//! Vue 3 story template.

use super::StoryTemplate;
use crate::module::Import;

/// Composition API template: props live in a `reactive` object updated by a
/// `watch` on args, routing goes through `useRouter()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vue3Template;

impl StoryTemplate for Vue3Template {
    fn id(&self) -> &'static str {
        "vue3"
    }

    fn name(&self) -> &'static str {
        "Vue 3"
    }

    fn framework_imports(&self) -> Vec<Import> {
        vec![
            Import::named(["useRouter"], "vue-router"),
            Import::named(["reactive", "watch"], "vue"),
        ]
    }

    fn template_class(&self, component: &str) -> String {
        format!(
            r#"class Template {{
  constructor(env) {{
    this.env = env;
    this.render = this.render.bind(this);
  }}

  render(args) {{
    const props = reactive(buildData(args, 'props'));
    applyEnvironment(this.env || defaultEnvironment(), args);
    return {{
      components: {{ {component} }},
      setup() {{
        const router = useRouter();
        watch(args, (newArgs) => {{
          if (newArgs.url) {{
            router.replace(newArgs.url);
          }}
          Object.assign(props, buildData(newArgs, 'props'));
        }}, {{ immediate: true }});
        return {{ props }};
      }},
      template: '<{component} v-bind="props" />',
    }};
  }}
}}"#,
            component = component
        )
    }
}
