//! Stock tables used when `upkeep.toml` does not override a section.

pub const DEFAULT_CONFIG_FILE: &str = "upkeep.toml";
pub const DEFAULT_NOTES_DIR: &str = "notes";

/// (from, to) root files moved into the layered tree.
pub const ORGANIZE_MOVES: &[(&str, &str)] = &[
    ("api.py", "src/apps/api.py"),
    ("bot.py", "src/apps/bot.py"),
    ("chains.py", "src/apps/chains.py"),
    ("loader.py", "src/apps/loader.py"),
    ("pdf_bot.py", "src/apps/pdf_bot.py"),
    ("utils.py", "src/apps/utils.py"),
    ("api.Dockerfile", "docker/api.Dockerfile"),
    ("bot.Dockerfile", "docker/bot.Dockerfile"),
    ("front-end.Dockerfile", "docker/front-end.Dockerfile"),
    ("loader.Dockerfile", "docker/loader.Dockerfile"),
    ("pdf_bot.Dockerfile", "docker/pdf_bot.Dockerfile"),
    ("pull_model.Dockerfile", "docker/pull_model.Dockerfile"),
    ("docker-compose.yml", "config/docker-compose.yml"),
    ("requirements.txt", "config/requirements.txt"),
    ("env.example", "config/env.example"),
    ("install_ollama.sh", "scripts/install_ollama.sh"),
    ("readme.md", "docs/README_PROJECT.md"),
    ("running_on_wsl.md", "docs/running_on_wsl.md"),
];
pub const BACKUP_SUFFIX: &str = ".backup";

pub const IMPORT_FILES: &[&str] = &[
    "src/agents/orchestrator.py",
    "src/agents/kestra_langchain_master.py",
    "src/agents/agent_helper_system.py",
    "src/agents/mcp_manager.py",
    "src/agents/mcp_manager_ui.py",
    "src/agents/mcp_docker_integration.py",
    "src/agents/mcp_neo4j_integration.py",
    "src/agents/mcp_obsidian_integration.py",
    "src/agents/mcp_kestra_integration.py",
    "src/apps/bot.py",
    "src/apps/loader.py",
    "src/apps/pdf_bot.py",
    "src/apps/api.py",
    "src/apps/chains.py",
    "src/apps/utils.py",
    "scripts/master_demo.py",
    "scripts/sync_obsidian_docs.py",
    "scripts/verificar_integracao_obsidian.py",
];

/// Modules moved under `src.agents`.
pub const MOVED_AGENT_MODULES: &[&str] = &[
    "mcp_manager",
    "mcp_docker_integration",
    "mcp_neo4j_integration",
    "mcp_obsidian_integration",
    "mcp_kestra_integration",
    "kestra_langchain_master",
    "agent_helper_system",
    "orchestrator",
];

/// Modules moved under `src.apps`.
pub const MOVED_APP_MODULES: &[&str] = &["chains", "utils"];

pub const LINK_RENAMES: &[(&str, &str)] = &[
    ("Agentes/Db-Manager", "Agentes/DB-Manager"),
    ("Agentes/Mcp-Manager", "Agentes/MCP-Manager"),
    ("Agentes/Mcp-Neo4j-Integration", "Agentes/Neo4j-GraphRAG"),
    ("Agentes/Mcp-Obsidian-Integration", "Agentes/Obsidian-Integration"),
    ("Agentes/Mcp-Kestra-Integration", "Agentes/Kestra-Agent"),
    ("Agentes/Mcp-Docker-Integration", "Agentes/Docker-Integration"),
    ("Agentes/Agent-Dashboard-Ui", "Agentes/Agent-Dashboard-UI"),
    ("Agentes/Mcp-Manager-Ui", "Agentes/MCP-Manager-UI"),
];

pub const SEED_NOTES: &[(&str, &str)] = &[
    (
        "Agentes/DB-Manager.md",
        "# DB Manager\n\nAgent that manages the project databases.\n\nSee: [[Project-Overview|Main project]]\n",
    ),
    (
        "Agentes/Git-Integration.md",
        "# Git Integration\n\nAgent for Git and GitHub integration.\n\nSee: [[Project-Overview|Main project]]\n",
    ),
];

pub const PROJECT_NAME: &str = "MCP Orchestrator";
pub const PROJECT_SHORT_NAME: &str = "mcp-orchestrator";
pub const PROJECT_DESCRIPTION: &str = "Professional MCP agent orchestration platform";

pub const RENAME_REPLACEMENTS: &[(&str, &str, &str)] = &[
    ("README.md", "MCP Agent System - Orchestrator", "{name}"),
    ("README.md", "Modular agent system", "{description}"),
    ("README.md", "IA-test", "{short_name}"),
    ("docs/README.md", "MCP Agent System", "{name}"),
    ("docs/PROJECT_LAYOUT.md", "MCP Agent System", "{name}"),
];

pub const PROVIDER_FILE: &str = "src/apps/chains.py";
pub const PROVIDER_MARKERS: &[&str] = &["ChatGoogleGenerativeAI"];
pub const PROVIDER_IMPORT_LINE: &str = "from langchain_google_genai import ChatGoogleGenerativeAI";
pub const PROVIDER_IMPORT_ANCHORS: &[&str] = &[
    "from langchain_google_genai import GoogleGenerativeAIEmbeddings",
    "from langchain_aws import ChatBedrock",
];
pub const PROVIDER_BLOCK: &str = r#"    elif llm_name in ["gemini", "gemini-pro", "gemini-1.5-pro", "gemini-1.5-flash"]:
        import os
        logger.info(f"LLM: Using Google Gemini: {llm_name}")
        google_api_key = os.getenv("GOOGLE_API_KEY")
        if not google_api_key:
            raise ValueError("GOOGLE_API_KEY is not set. Configure it in the .env file")
        return ChatGoogleGenerativeAI(
            model=llm_name.replace("gemini-", "gemini-1.5-") if "gemini-pro" in llm_name else llm_name,
            temperature=0,
            google_api_key=google_api_key,
            streaming=True
        )
"#;
pub const PROVIDER_BLOCK_ANCHORS: &[&str] =
    &["    elif len(llm_name):", "    logger.info(\"LLM: Using GPT-3.5\")"];
pub const PROVIDER_HINTS: &[&str] = &["LLM=gemini-pro", "GOOGLE_API_KEY=<your Google API key>"];

pub const ENV_FILE: &str = ".env";
pub const ENV_TEMPLATE: &str = "config/env.example";

/// (key, default) pairs read from the process environment by `env apply`.
pub const ENV_ASSIGNMENTS: &[(&str, &str)] = &[
    ("GOOGLE_API_KEY", ""),
    ("NEON_PROJECT_ID", ""),
    ("MONGODB_URI", ""),
    ("MONGODB_DATABASE", "default"),
    ("MONGODB_ATLAS", "false"),
];

pub const ENV_PLACEHOLDER_PREFIXES: &[&str] = &["SUBSTITUA", "CHANGE_ME", "your_"];

/// (group, name, description, required_for)
pub const ENV_REQUIRED: &[(&str, &str, &str, &[&str])] = &[
    ("critical", "NEO4J_URI", "Neo4j Aura DB URI", &["Neo4j", "GraphRAG"]),
    ("critical", "NEO4J_USERNAME", "Neo4j username", &["Neo4j"]),
    ("critical", "NEO4J_PASSWORD", "Neo4j password", &["Neo4j"]),
    ("apis", "OPENAI_API_KEY", "OpenAI API key", &["OpenAI LLM", "OpenAI Embeddings"]),
    ("apis", "GOOGLE_API_KEY", "Google API key", &["Google Embeddings"]),
    ("apis", "AWS_ACCESS_KEY_ID", "AWS access key id", &["AWS Bedrock"]),
    ("apis", "AWS_SECRET_ACCESS_KEY", "AWS secret access key", &["AWS Bedrock"]),
    ("apis", "AWS_DEFAULT_REGION", "AWS region", &["AWS Bedrock"]),
    ("databases", "SUPABASE_URL", "Supabase URL", &["Supabase DB"]),
    ("databases", "SUPABASE_KEY", "Supabase key", &["Supabase DB"]),
    ("databases", "NEON_DATABASE_URL", "Neon URL", &["Neon DB"]),
    ("databases", "MONGODB_URI", "MongoDB URI", &["MongoDB"]),
    ("databases", "MONGODB_DATABASE", "MongoDB database", &["MongoDB"]),
    ("optional", "LANGCHAIN_API_KEY", "LangChain API key", &["LangSmith"]),
    ("optional", "OBSIDIAN_VAULT_PATH", "Obsidian vault path", &["Obsidian Integration"]),
    ("optional", "OLLAMA_BASE_URL", "Ollama URL", &["Ollama LLM"]),
    ("settings", "LLM", "LLM model", &["All agents"]),
    ("settings", "EMBEDDING_MODEL", "Embedding model", &["RAG", "Vector Search"]),
];

pub const GIT_REMOTE: &str = "origin";
pub const GIT_DEFAULT_BRANCH: &str = "main";
pub const GIT_COMMIT_MESSAGE: &str = "chore: sync project reorganization";

pub const IMPORTANT_CONTAINERS: &[&str] = &[
    "ia-test", "n8n", "dokploy", "postgres", "redis", "ollama", "kestra", "neo4j", "traefik",
    "database",
];
pub const PROJECT_CONTAINERS: &[&str] = &["ia-test", "kestra", "neo4j"];
pub const ORPHAN_MIN_TOKEN_LEN: usize = 3;
pub const CONFIRM_PHRASE: &str = "YES";
pub const CONTAINER_REPORT_FILE: &str = "containers-report.json";

pub const MIGRATE_LEGACY: &[&str] = &["iaimplementation-n8n", "dokploy"];
pub const MIGRATE_KEEP: &str = "consolidated";
pub const MIGRATE_SWARM_PREFIXES: &[&str] = &["dokploy.1."];
pub const MIGRATE_STOPPED_ONLY: &[&str] = &["dokploy"];
pub const MIGRATE_SERVICES: &[&str] = &["dokploy", "dokploy-postgres", "dokploy-redis"];

pub const MCP_SERVERS_FILE: &str = "mcp_servers.json";
pub const MCP_EDITOR_FILE: &str = ".cursor/mcp.json";
pub const MCP_REPORT_FILE: &str = "mcp-cleanup-report.json";
pub const MCP_EXTENSIONS: &[&str] = &["py"];
pub const MCP_REFERENCE_PATTERNS: &[&str] = &[
    r"(?i)@modelcontextprotocol/server-(\w+)",
    r"(?i)@(\w+)/mcp-server-(\w+)",
    r"(?i)mcp-server-(\w+)",
    r"(?i)server-(\w+)",
];
pub const MCP_ESSENTIAL: &[&str] = &["neo4j", "obsidian", "git"];
pub const MCP_OPTIONAL: &[&str] = &["filesystem", "puppeteer", "brave-search"];

pub const MIRROR_DESTINATION: &str = "NotebookLM";
pub const MIRROR_GROUPS: &[(&str, &[&str])] = &[
    (
        "01-Fundamentals",
        &[
            "Project-Overview.md",
            "00-AGENT-MAP.md",
            "PROJECT-STRUCTURE.md",
            "00-PENDING-ERRORS-AND-SETTINGS.md",
        ],
    ),
    (
        "02-LangChain-LangGraph",
        &[
            "LANGCHAIN-LANGGRAPH-GUIDE.md",
            "LANGCHAIN-FUNDAMENTALS.md",
            "LANGGRAPH-CONCEPTS.md",
            "LANGGRAPH-WORKFLOWS.md",
            "LANGCHAIN-NEO4J.md",
            "LANGGRAPH-PATTERNS.md",
            "LANGGRAPH-AGENTS.md",
            "LANGCHAIN-EXAMPLES.md",
        ],
    ),
    (
        "03-Agents",
        &[
            "Agentes/Orchestrator.md",
            "Agentes/System-Health.md",
            "Agentes/DB-Manager.md",
            "Agentes/MCP-Manager.md",
            "Agentes/Neo4j-GraphRAG.md",
            "Agentes/Obsidian-Integration.md",
            "Agentes/Kestra-Agent.md",
            "Agentes/Docker-Integration.md",
            "Agentes/Git-Integration.md",
        ],
    ),
    (
        "04-Configuration",
        &[
            "APPLIED-SETTINGS.md",
            "NEO4J-CONFIGURED.md",
            "HOW-TO-CONFIGURE-NEO4J-URI.md",
            "DATABASE-ANALYSIS.md",
        ],
    ),
    ("05-Examples", &["MCP-AGENT-VIDEOS.md", "AGENT-OPTIMIZATION.md"]),
    ("06-References", &["README-STRUCTURE.md", "AGENT-MAP-SUMMARY.md"]),
];

pub const DEPS_GROUPS: &[(&str, &[&str])] = &[
    (
        "critical",
        &["langsmith>=0.1.0", "redis>=5.0.0", "celery>=5.3.0", "slowapi>=0.1.9"],
    ),
    (
        "important",
        &[
            "fastapi-users>=12.0.0",
            "python-jose[cryptography]>=3.3.0",
            "sentry-sdk>=2.0.0",
        ],
    ),
    ("optional", &["structlog>=23.2.0", "prometheus-client>=0.19.0"]),
    ("playwright", &["playwright", "pytest-playwright"]),
];
pub const PLAYWRIGHT_POST_INSTALL: &[&str] = &["-m", "playwright", "install", "chromium"];

pub const DASHBOARD_SCRIPT: &str = "src/apps/agent_dashboard.py";
pub const DASHBOARD_PORT: u16 = 8508;
pub const DASHBOARD_ADDRESS: &str = "0.0.0.0";
pub const DASHBOARD_STARTUP_WAIT_SECS: u64 = 5;
